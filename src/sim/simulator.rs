//! Discrete-event replay of a route plan under stochastic weather.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use rand::Rng;
use tracing::debug;

use super::event::{CostLedger, SimulationEvent};
use crate::models::{ProblemInstance, RoutePlan};
use crate::weather::{Condition, WeatherProcess};

/// Operating cost per realized travel minute (fuel plus driver).
pub const OPERATING_COST_PER_MINUTE: f64 = 1.0;

/// What a vehicle process does at its next wake-up.
#[derive(Debug, Clone)]
enum Action {
    /// Start the next leg: draw weather and schedule the arrival.
    Depart,
    /// Complete a leg: log the event and price any overtime.
    Arrive {
        weather: Condition,
        base_minutes: u32,
        realized_minutes: f64,
    },
}

/// A scheduled wake-up for one vehicle process.
///
/// Ordered so the earliest time pops first; equal times resolve by push
/// sequence, which is process insertion order at clock zero and schedule
/// order afterwards.
#[derive(Debug)]
struct Wake {
    time: f64,
    seq: u64,
    vehicle: usize,
    action: Action,
}

impl PartialEq for Wake {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Wake {}

impl PartialOrd for Wake {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wake {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest wake.
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Per-vehicle traversal state.
#[derive(Debug)]
struct VehicleProcess {
    vehicle_id: usize,
    stops: Vec<usize>,
    /// Index of the leg currently being traversed or departed next.
    leg: usize,
    /// Location the vehicle last departed from or arrived at.
    position: usize,
}

impl VehicleProcess {
    /// Destination of the current leg; the depot after the final stop.
    fn target(&self) -> usize {
        self.stops.get(self.leg).copied().unwrap_or(0)
    }
}

/// The completed output of one simulation run: the time-ordered event log
/// plus the run's overtime total.
///
/// Aggregate metrics are derived from the log on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    events: Vec<SimulationEvent>,
    total_overtime_cost: f64,
}

impl SimulationReport {
    /// The event log, one entry per traversed leg, ordered by arrival time.
    pub fn events(&self) -> &[SimulationEvent] {
        &self.events
    }

    /// Number of legs traversed across all vehicles.
    pub fn num_legs(&self) -> usize {
        self.events.len()
    }

    /// Total overtime cost accrued by this run.
    pub fn total_overtime_cost(&self) -> f64 {
        self.total_overtime_cost
    }

    /// Total realized travel minutes across all legs.
    pub fn total_travel_minutes(&self) -> f64 {
        self.events.iter().map(|e| e.realized_minutes).sum()
    }

    /// Mean weather-induced delay per leg, zero for an empty log.
    pub fn mean_delay(&self) -> f64 {
        if self.events.is_empty() {
            return 0.0;
        }
        self.events.iter().map(|e| e.delay).sum::<f64>() / self.events.len() as f64
    }

    /// Number of legs traversed under each weather condition.
    pub fn weather_counts(&self) -> HashMap<Condition, usize> {
        let mut counts = HashMap::new();
        for event in &self.events {
            *counts.entry(event.weather).or_insert(0) += 1;
        }
        counts
    }

    /// Operating cost of the realized travel time.
    pub fn operating_cost(&self) -> f64 {
        self.total_travel_minutes() * OPERATING_COST_PER_MINUTE
    }

    /// Operating cost plus overtime cost.
    pub fn total_cost(&self) -> f64 {
        self.operating_cost() + self.total_overtime_cost
    }
}

/// Replays a fixed route plan, one logical process per non-empty route, over
/// a shared virtual clock.
///
/// Each leg draws an independent weather condition that scales its travel
/// time; arrivals past a stop's window close (or past the shift deadline for
/// the final depot return) are priced into the run's [`CostLedger`]. The
/// plan is consumed read-only, and every run owns its own log and ledger, so
/// comparison runs over different plans share nothing mutable.
///
/// # Examples
///
/// ```
/// use fleetsim::models::{Location, ProblemInstance, TimeWindow};
/// use fleetsim::matrix::TravelTimeMatrix;
/// use fleetsim::sim::LogisticsSimulator;
/// use fleetsim::solver::{GreedySolver, Solver};
/// use fleetsim::weather::WeatherProcess;
/// use rand::{rngs::StdRng, SeedableRng};
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
/// let plan = GreedySolver.solve(&instance);
/// let weather = WeatherProcess::clear();
/// let simulator = LogisticsSimulator::new(&instance, &plan, &weather);
/// let report = simulator.run(&mut StdRng::seed_from_u64(1));
/// assert_eq!(report.num_legs(), 3);
/// assert_eq!(report.total_overtime_cost(), 0.0);
/// ```
pub struct LogisticsSimulator<'a> {
    instance: &'a ProblemInstance,
    plan: &'a RoutePlan,
    weather: &'a WeatherProcess,
}

impl<'a> LogisticsSimulator<'a> {
    /// Creates a simulator over the given instance, plan, and weather.
    pub fn new(
        instance: &'a ProblemInstance,
        plan: &'a RoutePlan,
        weather: &'a WeatherProcess,
    ) -> Self {
        Self {
            instance,
            plan,
            weather,
        }
    }

    /// Runs the simulation to completion and returns the report.
    ///
    /// Blocks until every vehicle process reaches its final depot return. An
    /// empty plan yields an empty, correctly-shaped report.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationReport {
        let mut processes: Vec<VehicleProcess> = self
            .plan
            .routes()
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| VehicleProcess {
                vehicle_id: r.vehicle_id(),
                stops: r.location_ids(),
                leg: 0,
                position: 0,
            })
            .collect();

        let mut heap = BinaryHeap::new();
        let mut seq: u64 = 0;
        for vehicle in 0..processes.len() {
            heap.push(Wake {
                time: 0.0,
                seq,
                vehicle,
                action: Action::Depart,
            });
            seq += 1;
        }

        let mut events = Vec::new();
        let mut ledger = CostLedger::new();

        while let Some(wake) = heap.pop() {
            let process = &mut processes[wake.vehicle];
            match wake.action {
                Action::Depart => {
                    let to = process.target();
                    let base_minutes = self.instance.travel_time(process.position, to);
                    let weather = self.weather.draw(rng);
                    let realized_minutes = f64::from(base_minutes) * weather.multiplier();
                    heap.push(Wake {
                        time: wake.time + realized_minutes,
                        seq,
                        vehicle: wake.vehicle,
                        action: Action::Arrive {
                            weather,
                            base_minutes,
                            realized_minutes,
                        },
                    });
                    seq += 1;
                }
                Action::Arrive {
                    weather,
                    base_minutes,
                    realized_minutes,
                } => {
                    let to = process.target();
                    let arrival = wake.time;
                    let bound = if to == 0 {
                        f64::from(self.instance.max_time_minutes())
                    } else {
                        f64::from(self.instance.location(to).window().latest())
                    };
                    let overtime_cost = if arrival > bound {
                        ledger.charge_overtime(arrival - bound)
                    } else {
                        0.0
                    };

                    events.push(SimulationEvent {
                        vehicle_id: process.vehicle_id,
                        from: process.position,
                        to,
                        weather,
                        base_minutes,
                        realized_minutes,
                        arrival_time: arrival,
                        delay: realized_minutes - f64::from(base_minutes),
                        overtime_cost,
                    });

                    process.position = to;
                    process.leg += 1;
                    if to != 0 {
                        heap.push(Wake {
                            time: arrival + f64::from(self.instance.service_minutes()),
                            seq,
                            vehicle: wake.vehicle,
                            action: Action::Depart,
                        });
                        seq += 1;
                    }
                }
            }
        }

        debug!(
            legs = events.len(),
            overtime_cost = ledger.total(),
            "simulation run complete"
        );
        SimulationReport {
            events,
            total_overtime_cost: ledger.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::ScheduleEvaluator;
    use crate::matrix::TravelTimeMatrix;
    use crate::models::{Location, TimeWindow};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_instance(windows: Vec<(u32, u32)>, service: u32, max_time: u32) -> ProblemInstance {
        let shift = TimeWindow::new(0, max_time).expect("valid");
        let mut locations = vec![Location::depot(shift)];
        for (i, (earliest, latest)) in windows.iter().enumerate() {
            let tw = TimeWindow::new(*earliest, *latest).expect("valid");
            locations.push(Location::new(i + 1, 5, tw));
        }
        let rows = match locations.len() {
            2 => vec![vec![0, 10], vec![10, 0]],
            _ => vec![vec![0, 10, 20], vec![10, 0, 15], vec![20, 15, 0]],
        };
        let matrix = TravelTimeMatrix::from_rows(rows).expect("valid");
        ProblemInstance::new(locations, matrix, 2, 50, service, max_time).expect("valid")
    }

    fn plan_from(instance: &ProblemInstance, sequences: &[Vec<usize>]) -> RoutePlan {
        let evaluator = ScheduleEvaluator::new(instance);
        let mut plan = RoutePlan::new();
        for (vehicle_id, seq) in sequences.iter().enumerate() {
            let (route, _) = evaluator.build_route(vehicle_id, seq);
            plan.add_route(route);
        }
        plan
    }

    #[test]
    fn test_empty_plan_empty_log() {
        let instance = small_instance(vec![(0, 480), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![], vec![]]);
        let weather = WeatherProcess::clear();
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));
        assert_eq!(report.num_legs(), 0);
        assert_eq!(report.total_overtime_cost(), 0.0);
        assert_eq!(report.mean_delay(), 0.0);
        assert!(report.weather_counts().is_empty());
    }

    #[test]
    fn test_sunny_run_timing() {
        let instance = small_instance(vec![(0, 480), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1, 2]]);
        let weather = WeatherProcess::clear();
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));

        // Depart 0: arrive 1 at 10; serve until 20; arrive 2 at 35; serve
        // until 45; arrive depot at 65.
        let arrivals: Vec<f64> = report.events().iter().map(|e| e.arrival_time).collect();
        assert_eq!(arrivals, vec![10.0, 35.0, 65.0]);
        assert_eq!(report.total_travel_minutes(), 45.0);
        assert_eq!(report.total_overtime_cost(), 0.0);
        assert_eq!(report.mean_delay(), 0.0);
        for event in report.events() {
            assert_eq!(event.weather, Condition::Sunny);
            assert_eq!(event.overtime_cost, 0.0);
        }
    }

    #[test]
    fn test_window_overtime_priced() {
        // Customer 1's window closes at 5 but travel takes 10 even when
        // sunny: 5 minutes of overtime at 2.5 per minute.
        let instance = small_instance(vec![(0, 5), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1]]);
        let weather = WeatherProcess::clear();
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));
        let first = &report.events()[0];
        assert!((first.overtime_cost - 12.5).abs() < 1e-10);
        assert!((report.total_overtime_cost() - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_shift_deadline_overtime_on_return() {
        // Shift ends at 35; the depot return lands at 40 even when sunny.
        let instance = small_instance(vec![(0, 480)], 10, 35);
        let plan = plan_from(&instance, &[vec![1]]);
        let weather = WeatherProcess::clear();
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));
        let last = report.events().last().expect("return leg");
        assert_eq!(last.to, 0);
        assert!((last.arrival_time - 30.0).abs() < 1e-10);
        assert_eq!(last.overtime_cost, 0.0);

        // Tighten further: deadline 25, return at 30 → 5 minutes over.
        let instance = small_instance(vec![(0, 480)], 10, 25);
        let plan = plan_from(&instance, &[vec![1]]);
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));
        let last = report.events().last().expect("return leg");
        assert!((last.overtime_cost - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_storm_slows_travel() {
        // Probability mass pinned to storms: every leg is 60% slower.
        let instance = small_instance(vec![(0, 480), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1, 2]]);
        let weather = WeatherProcess::new(1.0, 0.0).expect("valid");
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));
        assert!((report.total_travel_minutes() - 45.0 * 1.6).abs() < 1e-9);
        assert!(report.mean_delay() > 0.0);
        assert_eq!(report.weather_counts()[&Condition::SevereStorm], 3);
    }

    #[test]
    fn test_deterministic_under_seed() {
        let instance = small_instance(vec![(0, 480), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1], vec![2]]);
        let weather = WeatherProcess::new(0.2, 0.3).expect("valid");
        let simulator = LogisticsSimulator::new(&instance, &plan, &weather);

        let a = simulator.run(&mut StdRng::seed_from_u64(99));
        let b = simulator.run(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cross_vehicle_events_in_clock_order() {
        // Vehicle 1's first leg (20 min) finishes after vehicle 0's (10 min),
        // so the log interleaves by simulated time, not declaration order.
        let instance = small_instance(vec![(0, 480), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1], vec![2]]);
        let weather = WeatherProcess::clear();
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));

        assert_eq!(report.num_legs(), 4);
        assert_eq!(report.events()[0].vehicle_id, 0);
        assert_eq!(report.events()[1].vehicle_id, 1);
        let arrivals: Vec<f64> = report.events().iter().map(|e| e.arrival_time).collect();
        let mut sorted = arrivals.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(arrivals, sorted);
    }

    #[test]
    fn test_runs_do_not_share_state() {
        let instance = small_instance(vec![(0, 5), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1]]);
        let weather = WeatherProcess::clear();
        let simulator = LogisticsSimulator::new(&instance, &plan, &weather);

        let first = simulator.run(&mut StdRng::seed_from_u64(1));
        let second = simulator.run(&mut StdRng::seed_from_u64(1));
        // Each run owns its ledger; costs don't accumulate across runs.
        assert_eq!(first.total_overtime_cost(), second.total_overtime_cost());
    }

    #[test]
    fn test_report_cost_breakdown() {
        let instance = small_instance(vec![(0, 480), (0, 480)], 10, 480);
        let plan = plan_from(&instance, &[vec![1, 2]]);
        let weather = WeatherProcess::clear();
        let report =
            LogisticsSimulator::new(&instance, &plan, &weather).run(&mut StdRng::seed_from_u64(1));
        assert!((report.operating_cost() - 45.0).abs() < 1e-10);
        assert!((report.total_cost() - 45.0).abs() < 1e-10);
    }
}
