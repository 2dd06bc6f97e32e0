//! Schedule evaluator that computes timing, load, and constraint violations.

use crate::models::{ProblemInstance, Route, Stop};
use crate::MINUTES_PER_DAY;

/// A constraint violation found while scheduling a stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Arrival after a location's window closes.
    WindowMissed {
        /// Location where the window was missed.
        location: usize,
        /// Planned arrival time.
        arrival: u32,
        /// Window close time.
        latest: u32,
    },
    /// Route load exceeds vehicle capacity.
    CapacityExceeded {
        /// Accumulated load.
        load: u32,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// Depot return past the end of the 24-hour horizon.
    HorizonExceeded {
        /// Planned depot return time.
        return_time: u32,
    },
}

/// Computes planned schedules for stop sequences and checks constraints.
///
/// The schedule walk starts at the depot window's `earliest`; at each stop
/// the vehicle waits (for free) if it arrives before the window opens, and
/// service takes the instance's fixed duration. Service time is attributed to
/// the departure node, so the depot contributes none.
///
/// Returning to the depot after the shift deadline is not a violation here:
/// late returns are priced as overtime during simulation. Only a return past
/// the 24-hour horizon is rejected.
///
/// # Examples
///
/// ```
/// use fleetsim::models::{Location, ProblemInstance, TimeWindow};
/// use fleetsim::matrix::TravelTimeMatrix;
/// use fleetsim::evaluation::ScheduleEvaluator;
///
/// let shift = TimeWindow::new(0, 480).unwrap();
/// let instance = ProblemInstance::new(
///     vec![
///         Location::depot(shift),
///         Location::new(1, 5, shift),
///         Location::new(2, 5, shift),
///     ],
///     TravelTimeMatrix::from_rows(vec![
///         vec![0, 10, 20],
///         vec![10, 0, 15],
///         vec![20, 15, 0],
///     ]).unwrap(),
///     1, 50, 10, 480,
/// ).unwrap();
///
/// let evaluator = ScheduleEvaluator::new(&instance);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert!(violations.is_empty());
/// assert_eq!(route.total_travel(), 45);
/// ```
pub struct ScheduleEvaluator<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> ScheduleEvaluator<'a> {
    /// Creates an evaluator for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Builds an annotated route from a sequence of location indices.
    ///
    /// Returns the constructed route and any constraint violations found.
    pub fn build_route(&self, vehicle_id: usize, locations: &[usize]) -> (Route, Vec<Violation>) {
        let mut route = Route::new(vehicle_id);
        let mut violations = Vec::new();

        let depot_window = self.instance.location(0).window();
        let mut clock = depot_window.earliest();
        let mut load: u32 = 0;
        let mut total_travel: u32 = 0;
        let mut prev = 0;

        for &loc in locations {
            let travel = self.instance.travel_time(prev, loc);
            total_travel += travel;
            let arrival = clock + travel;

            let window = self.instance.location(loc).window();
            if window.is_missed(arrival) {
                violations.push(Violation::WindowMissed {
                    location: loc,
                    arrival,
                    latest: window.latest(),
                });
            }

            let service_start = arrival + window.waiting_before(arrival);
            let departure = service_start + self.instance.service_at(loc);
            load += self.instance.location(loc).demand();

            route.push_stop(Stop {
                location: loc,
                arrival,
                departure,
                load_after: load,
            });

            clock = departure;
            prev = loc;
        }

        let return_travel = self.instance.travel_time(prev, 0);
        total_travel += return_travel;
        let return_time = clock + return_travel;

        route.set_total_travel(total_travel);
        route.set_return_time(return_time);

        if load > self.instance.vehicle_capacity() {
            violations.push(Violation::CapacityExceeded {
                load,
                capacity: self.instance.vehicle_capacity(),
            });
        }

        if !locations.is_empty() && return_time > MINUTES_PER_DAY {
            violations.push(Violation::HorizonExceeded { return_time });
        }

        (route, violations)
    }

    /// Returns `true` if the given stop sequence violates no hard constraint.
    pub fn is_feasible(&self, locations: &[usize]) -> bool {
        let (_, violations) = self.build_route(0, locations);
        violations.is_empty()
    }
}
