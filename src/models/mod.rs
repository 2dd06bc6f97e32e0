//! Domain model types for route planning and simulation.
//!
//! Provides the core data contracts: locations with demands and time windows,
//! the problem instance that aggregates them with fleet parameters, routes as
//! ordered stop sequences with planned schedules, and the route plan returned
//! by a solver.

mod instance;
mod location;
mod plan;
mod route;

pub use instance::{InstanceError, ProblemInstance};
pub use location::{Location, TimeWindow};
pub use plan::RoutePlan;
pub use route::{Route, Stop};
