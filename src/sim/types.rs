//! Core simulation parameters.

use serde::Serialize;

use super::clock::DEFAULT_TICK_INTERVAL_MS;
use super::event_log::DEFAULT_EVENT_LOG_LEN;
use super::history::DEFAULT_HISTORY_LEN;
use super::tick::DEFAULT_FLUCTUATION_MW;

/// Default half-width of the synthetic frequency jitter (Hz).
pub const DEFAULT_FREQUENCY_JITTER_HZ: f64 = 0.05;

/// Centralized simulation configuration.
///
/// Every [`GridState`](super::engine::GridState) carries one; ticks read
/// drift and jitter magnitudes from it and timestamps derive from
/// `tick_interval_ms`.
///
/// # Examples
///
/// ```
/// use vpp_dashboard::sim::types::SimConfig;
///
/// let cfg = SimConfig::default();
/// assert_eq!(cfg.tick_interval_ms, 3000);
/// assert_eq!(cfg.elapsed_ms(2), 6000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    /// Interval between ticks (ms).
    pub tick_interval_ms: u64,
    /// Half-width of the per-tick output drift (MW).
    pub fluctuation_mw: f64,
    /// Half-width of the frequency jitter around nominal (Hz).
    pub frequency_jitter_hz: f64,
    /// Retained history points.
    pub history_len: usize,
    /// Retained event log entries.
    pub event_log_len: usize,
}

impl SimConfig {
    /// Simulated elapsed time after `ticks` ticks (ms).
    pub fn elapsed_ms(&self, ticks: u64) -> u64 {
        ticks.saturating_mul(self.tick_interval_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            fluctuation_mw: DEFAULT_FLUCTUATION_MW,
            frequency_jitter_hz: DEFAULT_FREQUENCY_JITTER_HZ,
            history_len: DEFAULT_HISTORY_LEN,
            event_log_len: DEFAULT_EVENT_LOG_LEN,
        }
    }
}
