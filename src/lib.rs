//! # fleetsim
//!
//! Delivery route planning for capacity-limited fleets under per-stop time
//! windows, paired with a discrete-event execution simulator that replays the
//! planned routes under stochastic weather and prices schedule violations.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, ProblemInstance, Route, RoutePlan)
//! - [`matrix`] — Travel time matrix
//! - [`evaluation`] — Route schedule computation and feasibility checking
//! - [`solver`] — Route optimizer strategies (constraint search, greedy baseline)
//! - [`weather`] — Stochastic weather process with travel-time multipliers
//! - [`sim`] — Logistics simulator with overtime cost accounting

pub mod evaluation;
pub mod matrix;
pub mod models;
pub mod sim;
pub mod solver;
pub mod weather;

/// Minutes in the 24-hour planning horizon.
///
/// Planning relaxes the shift deadline up to this bound: a late depot return
/// is priced as overtime rather than rejected outright, but no route may run
/// past the end of the day.
pub const MINUTES_PER_DAY: u32 = 1440;
