//! Logistics execution simulator.
//!
//! Replays a fixed route plan as one logical process per vehicle over a
//! shared virtual clock, drawing weather per leg and pricing every late
//! arrival as overtime. No partial results: [`LogisticsSimulator::run`]
//! blocks until every vehicle finishes and returns the complete, time-ordered
//! event log.

mod event;
mod simulator;

pub use event::{CostLedger, SimulationEvent, OVERTIME_RATE_PER_MINUTE};
pub use simulator::{LogisticsSimulator, SimulationReport, OPERATING_COST_PER_MINUTE};
