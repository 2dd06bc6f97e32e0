//! Constraint-search strategy: cheapest insertion plus budgeted improvement.
//!
//! # Algorithm
//!
//! Models the instance as a constrained-path problem with two cumulative
//! dimensions per vehicle: time (hard per-stop windows, waiting allowed,
//! depot return relaxed to the 24-hour horizon so overtime is priced rather
//! than forbidden) and load (hard capacity, never reset mid-route).
//!
//! Construction applies the globally cheapest feasible insertion until every
//! customer is routed, charging [`FIXED_VEHICLE_COST`](super::FIXED_VEHICLE_COST)
//! to activate an idle vehicle so stops consolidate onto as few routes as
//! windows and capacity allow. Improvement then runs a deterministic
//! best-improvement descent (inter-route relocate, intra-route 2-opt) until
//! the wall-clock budget expires or no operator improves.
//!
//! The result is best-effort: feasible and at least as good as the
//! constructed solution, with no global-optimality guarantee.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::improve::{insertion_travel_delta, relocate_step, two_opt_step};
use super::{plan_cost, Solver, FIXED_VEHICLE_COST};
use crate::evaluation::ScheduleEvaluator;
use crate::models::{ProblemInstance, RoutePlan};

/// Default improvement budget, matching the upstream planner's 30-unit limit.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Constructs feasible plans with cheapest insertion and improves them under
/// a wall-clock budget.
///
/// Always returns exactly `num_vehicles` routes, some possibly empty. When no
/// feasible assignment covers every customer, the plan comes back with all
/// routes empty and every customer unassigned — a reportable outcome, not an
/// error. Identical inputs and budget produce identical plans.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleetsim::models::{Location, ProblemInstance, TimeWindow};
/// use fleetsim::matrix::TravelTimeMatrix;
/// use fleetsim::solver::{SearchSolver, Solver};
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
///     2, 50, 0, 480,
/// ).unwrap();
///
/// let plan = SearchSolver::new(Duration::from_millis(50)).solve(&instance);
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.vehicles_used(), 1);
/// assert_eq!(plan.total_travel_minutes(), 45);
/// ```
#[derive(Debug, Clone)]
pub struct SearchSolver {
    time_limit: Duration,
}

impl SearchSolver {
    /// Creates a solver with the given improvement budget.
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    /// The configured improvement budget.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Cheapest-insertion construction.
    ///
    /// Returns `None` when some customer admits no feasible insertion.
    fn construct(&self, instance: &ProblemInstance) -> Option<Vec<Vec<usize>>> {
        let evaluator = ScheduleEvaluator::new(instance);
        let capacity = instance.vehicle_capacity();
        let mut routes: Vec<Vec<usize>> = vec![Vec::new(); instance.num_vehicles()];
        let mut unrouted: Vec<usize> = (1..=instance.num_customers()).collect();

        while !unrouted.is_empty() {
            let mut best: Option<(usize, usize, usize, f64)> = None;

            for (slot, &customer) in unrouted.iter().enumerate() {
                let demand = instance.location(customer).demand();
                for (route_idx, sequence) in routes.iter().enumerate() {
                    let load: u32 = sequence
                        .iter()
                        .map(|&c| instance.location(c).demand())
                        .sum();
                    if load + demand > capacity {
                        continue;
                    }
                    let activation = if sequence.is_empty() {
                        FIXED_VEHICLE_COST
                    } else {
                        0.0
                    };

                    for pos in 0..=sequence.len() {
                        let cost = insertion_travel_delta(sequence, pos, customer, instance)
                            as f64
                            + activation;
                        if best.is_some_and(|(_, _, _, c)| cost >= c) {
                            continue;
                        }
                        let mut candidate = sequence.clone();
                        candidate.insert(pos, customer);
                        if evaluator.is_feasible(&candidate) {
                            best = Some((slot, route_idx, pos, cost));
                        }
                    }
                }
            }

            let (slot, route_idx, pos, _) = best?;
            let customer = unrouted.remove(slot);
            routes[route_idx].insert(pos, customer);
        }

        Some(routes)
    }
}

impl Default for SearchSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_LIMIT)
    }
}

impl Solver for SearchSolver {
    fn solve(&self, instance: &ProblemInstance) -> RoutePlan {
        let deadline = Instant::now() + self.time_limit;

        let Some(mut routes) = self.construct(instance) else {
            info!("no feasible assignment found, returning empty plan");
            return RoutePlan::infeasible(instance.num_vehicles(), 1..=instance.num_customers());
        };
        debug!(
            cost = plan_cost(instance, &routes),
            "cheapest insertion complete"
        );

        while Instant::now() < deadline {
            let relocated = relocate_step(&mut routes, instance);
            let reversed = two_opt_step(&mut routes, instance);
            if !relocated && !reversed {
                break;
            }
        }

        let evaluator = ScheduleEvaluator::new(instance);
        let mut plan = RoutePlan::new();
        for (vehicle_id, sequence) in routes.iter().enumerate() {
            let (route, _) = evaluator.build_route(vehicle_id, sequence);
            plan.add_route(route);
        }
        plan.set_objective(plan_cost(instance, &routes));
        info!(
            objective = plan.objective(),
            vehicles_used = plan.vehicles_used(),
            travel_minutes = plan.total_travel_minutes(),
            "search finished"
        );
        plan
    }
}
