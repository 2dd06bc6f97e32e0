//! Route optimizer strategies.
//!
//! Two interchangeable strategies behind the [`Solver`] trait:
//!
//! - [`SearchSolver`] — cheapest-insertion construction followed by
//!   best-improvement local search under a wall-clock budget; enforces
//!   per-stop time windows, capacity, and the 24-hour horizon.
//! - [`GreedySolver`] — nearest-available-neighbor baseline simulating an
//!   unaided human planner; enforces capacity and the depot-return deadline
//!   only.

mod greedy;
mod improve;
mod search;

pub use greedy::GreedySolver;
pub use search::{SearchSolver, DEFAULT_TIME_LIMIT};

use crate::models::{ProblemInstance, RoutePlan};

/// Fixed cost charged per vehicle with a non-empty route.
///
/// Set well above any feasible route's travel so the search consolidates
/// stops onto fewer vehicles whenever time and capacity allow.
pub const FIXED_VEHICLE_COST: f64 = 100_000.0;

/// A route construction strategy.
///
/// Strategies are selected by composition: callers hold a `&dyn Solver` (or a
/// concrete strategy) and compare plans produced from the same instance.
pub trait Solver {
    /// Produces a route plan for the given instance.
    ///
    /// Infeasibility is a reportable outcome, not an error: a plan may carry
    /// empty routes and unassigned customers.
    fn solve(&self, instance: &ProblemInstance) -> RoutePlan;
}

/// Objective value of a set of stop sequences: travel plus service attributed
/// to each departure node, plus [`FIXED_VEHICLE_COST`] per non-empty route.
pub fn plan_cost(instance: &ProblemInstance, routes: &[Vec<usize>]) -> f64 {
    let mut total: u64 = 0;
    let mut used = 0usize;
    for seq in routes {
        if seq.is_empty() {
            continue;
        }
        used += 1;
        let mut prev = 0;
        for &loc in seq {
            total += u64::from(instance.travel_time(prev, loc)) + u64::from(instance.service_at(prev));
            prev = loc;
        }
        total += u64::from(instance.travel_time(prev, 0)) + u64::from(instance.service_at(prev));
    }
    total as f64 + FIXED_VEHICLE_COST * used as f64
}
