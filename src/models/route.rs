//! Route and stop types.

/// A single planned stop within a route.
///
/// Tracks the location index along with the schedule and load computed by the
/// evaluator under baseline (weather-free) travel times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    /// Location index being visited.
    pub location: usize,
    /// Planned arrival time, minutes from shift start.
    pub arrival: u32,
    /// Planned departure time (arrival + waiting + service).
    pub departure: u32,
    /// Cumulative load after serving this stop.
    pub load_after: u32,
}

/// An ordered sequence of customer stops assigned to one vehicle.
///
/// A route implicitly begins and ends at the depot (not stored in `stops`).
/// Routes are created by a solver and never mutated afterwards; the simulator
/// consumes them read-only.
///
/// # Examples
///
/// ```
/// use fleetsim::models::{Route, Stop};
///
/// let mut route = Route::new(0);
/// route.push_stop(Stop { location: 1, arrival: 10, departure: 25, load_after: 12 });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.location_ids(), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<Stop>,
    total_travel: u32,
    return_time: u32,
    total_load: u32,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            total_travel: 0,
            return_time: 0,
            total_load: 0,
        }
    }

    /// Appends a stop to the end of this route.
    pub fn push_stop(&mut self, stop: Stop) {
        self.total_load = stop.load_after;
        self.stops.push(stop);
    }

    /// Vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// The ordered sequence of stops.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of customer stops (excluding depot).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route visits no customers.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Location indices in visit order.
    pub fn location_ids(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.location).collect()
    }

    /// Total baseline travel minutes, including the return leg.
    pub fn total_travel(&self) -> u32 {
        self.total_travel
    }

    /// Planned depot return time (set by evaluator).
    pub fn return_time(&self) -> u32 {
        self.return_time
    }

    /// Total load delivered by this route.
    pub fn total_load(&self) -> u32 {
        self.total_load
    }

    /// Fraction of the given capacity this route's load occupies.
    pub fn fill_rate(&self, capacity: u32) -> f64 {
        if capacity == 0 {
            0.0
        } else {
            f64::from(self.total_load) / f64::from(capacity)
        }
    }

    /// Sets the total travel minutes (used by evaluator).
    pub fn set_total_travel(&mut self, minutes: u32) {
        self.total_travel = minutes;
    }

    /// Sets the depot return time (used by evaluator).
    pub fn set_return_time(&mut self, minutes: u32) {
        self.return_time = minutes;
    }
}
