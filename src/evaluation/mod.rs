//! Route schedule computation and feasibility checking.

mod schedule;

pub use schedule::{ScheduleEvaluator, Violation};
