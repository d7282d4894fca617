//! API response types.
//!
//! History records use the CSV export column names so both formats agree.

use serde::Serialize;

use crate::sim::history::HistoryPoint;
use crate::sim::{Advice, GridState, GridStats};

/// Current statistics plus scenario context.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Aggregates for the current fleet.
    #[serde(flatten)]
    pub stats: GridStats,
    /// Active scenario name, or `"normal"`.
    pub scenario: String,
    /// Ticks applied so far.
    pub tick_count: u64,
    /// Simulated elapsed time (ms).
    pub elapsed_ms: u64,
}

impl From<&GridState> for StatsResponse {
    fn from(state: &GridState) -> Self {
        Self {
            stats: state.stats(),
            scenario: state.scenario_label().to_string(),
            tick_count: state.tick_count(),
            elapsed_ms: state.elapsed_ms(),
        }
    }
}

/// Single history record using CSV column names.
#[derive(Debug, Serialize)]
pub struct HistoryRecord {
    pub timestamp_ms: u64,
    pub generation_mw: f64,
    pub consumption_mw: f64,
    pub net_mw: f64,
}

impl From<&HistoryPoint> for HistoryRecord {
    fn from(p: &HistoryPoint) -> Self {
        Self {
            timestamp_ms: p.timestamp_ms,
            generation_mw: p.generation,
            consumption_mw: p.consumption,
            net_mw: p.net,
        }
    }
}

/// Latest advice, `null` until one has been requested.
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: Option<Advice>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
