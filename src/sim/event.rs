//! Simulation events and the overtime cost ledger.

use serde::Serialize;

use crate::weather::Condition;

/// Monetary cost per minute of arriving past an allowed bound.
pub const OVERTIME_RATE_PER_MINUTE: f64 = 2.5;

/// One traversed leg in a simulation run.
///
/// Appended to the run's log when the vehicle arrives; the full ordered
/// sequence across all vehicles is the simulator's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationEvent {
    /// Vehicle that traversed the leg.
    pub vehicle_id: usize,
    /// Departure location index.
    pub from: usize,
    /// Arrival location index.
    pub to: usize,
    /// Weather drawn for this leg.
    pub weather: Condition,
    /// Baseline travel minutes for the leg.
    pub base_minutes: u32,
    /// Travel minutes after the weather multiplier.
    pub realized_minutes: f64,
    /// Absolute arrival time on the simulation clock.
    pub arrival_time: f64,
    /// Weather-induced delay on this leg (`realized - base`).
    pub delay: f64,
    /// Overtime cost charged at arrival, zero if within bounds.
    pub overtime_cost: f64,
}

/// Running total of overtime cost for one simulation run.
///
/// Monotonically non-decreasing and owned exclusively by its run; comparison
/// runs never share a ledger.
#[derive(Debug, Clone, Default)]
pub struct CostLedger {
    total: f64,
}

impl CostLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges overtime for the given minutes past a bound, returning the
    /// cost added.
    pub fn charge_overtime(&mut self, minutes_over: f64) -> f64 {
        let cost = minutes_over * OVERTIME_RATE_PER_MINUTE;
        self.total += cost;
        cost
    }

    /// Accumulated overtime cost.
    pub fn total(&self) -> f64 {
        self.total
    }
}
