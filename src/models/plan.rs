//! Route plan returned by a solver.

use super::Route;

/// A complete plan for one problem instance: one route per dispatched vehicle
/// plus the customers no route could serve.
///
/// The constraint-search strategy always returns exactly
/// `num_vehicles` routes (some possibly empty); the greedy baseline opens as
/// many routes as it needs, so its plan may carry more routes than the
/// physical fleet — comparing against the available fleet is the caller's
/// business rule.
///
/// # Examples
///
/// ```
/// use fleetsim::models::{Route, RoutePlan};
///
/// let mut plan = RoutePlan::new();
/// plan.add_route(Route::new(0));
/// plan.add_unassigned(3);
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.vehicles_used(), 0); // empty routes don't count
/// assert_eq!(plan.num_unassigned(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlan {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
    objective: f64,
}

impl RoutePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unassigned: Vec::new(),
            objective: 0.0,
        }
    }

    /// Creates an infeasible outcome: `num_vehicles` empty routes with every
    /// given customer unassigned.
    pub fn infeasible(num_vehicles: usize, customers: impl IntoIterator<Item = usize>) -> Self {
        let mut plan = Self::new();
        for vehicle_id in 0..num_vehicles {
            plan.add_route(Route::new(vehicle_id));
        }
        for c in customers {
            plan.add_unassigned(c);
        }
        plan
    }

    /// Adds a route to this plan.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a customer as unassigned.
    pub fn add_unassigned(&mut self, location: usize) {
        self.unassigned.push(location);
    }

    /// The routes in this plan, one per vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes, including empty ones.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of vehicles with a non-empty route.
    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Customers no route serves.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Number of unassigned customers.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Total baseline travel minutes across all routes.
    pub fn total_travel_minutes(&self) -> u32 {
        self.routes.iter().map(Route::total_travel).sum()
    }

    /// Mean fill rate over non-empty routes, in `[0, 1]`.
    pub fn mean_fill_rate(&self, capacity: u32) -> f64 {
        let used: Vec<_> = self.routes.iter().filter(|r| !r.is_empty()).collect();
        if used.is_empty() {
            return 0.0;
        }
        used.iter().map(|r| r.fill_rate(capacity)).sum::<f64>() / used.len() as f64
    }

    /// Objective value reported by the solver.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Sets the objective value.
    pub fn set_objective(&mut self, objective: f64) {
        self.objective = objective;
    }
}

impl Default for RoutePlan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    #[test]
    fn test_plan_empty() {
        let plan = RoutePlan::new();
        assert_eq!(plan.num_routes(), 0);
        assert_eq!(plan.num_served(), 0);
        assert_eq!(plan.num_unassigned(), 0);
        assert_eq!(plan.total_travel_minutes(), 0);
        assert_eq!(plan.mean_fill_rate(50), 0.0);
    }

    #[test]
    fn test_plan_counts() {
        let mut plan = RoutePlan::new();

        let mut r1 = Route::new(0);
        r1.push_stop(Stop {
            location: 1,
            arrival: 0,
            departure: 0,
            load_after: 10,
        });
        r1.set_total_travel(50);

        let mut r2 = Route::new(1);
        r2.push_stop(Stop {
            location: 2,
            arrival: 0,
            departure: 0,
            load_after: 5,
        });
        r2.push_stop(Stop {
            location: 3,
            arrival: 0,
            departure: 0,
            load_after: 15,
        });
        r2.set_total_travel(80);

        plan.add_route(r1);
        plan.add_route(r2);
        plan.add_route(Route::new(2));
        plan.add_unassigned(4);

        assert_eq!(plan.num_routes(), 3);
        assert_eq!(plan.vehicles_used(), 2);
        assert_eq!(plan.num_served(), 3);
        assert_eq!(plan.num_unassigned(), 1);
        assert_eq!(plan.total_travel_minutes(), 130);
    }

    #[test]
    fn test_plan_infeasible() {
        let plan = RoutePlan::infeasible(3, [1, 2]);
        assert_eq!(plan.num_routes(), 3);
        assert_eq!(plan.vehicles_used(), 0);
        assert_eq!(plan.unassigned(), &[1, 2]);
    }

    #[test]
    fn test_plan_mean_fill_rate_ignores_empty_routes() {
        let mut plan = RoutePlan::new();
        let mut r = Route::new(0);
        r.push_stop(Stop {
            location: 1,
            arrival: 0,
            departure: 0,
            load_after: 40,
        });
        plan.add_route(r);
        plan.add_route(Route::new(1));
        assert!((plan.mean_fill_rate(50) - 0.8).abs() < 1e-10);
    }
}
