//! Owned grid state and its transitions.

use serde::Serialize;
use tracing::{debug, info};

use crate::assets::{Asset, Registry};

use super::event_log::{EventLevel, EventLog};
use super::history::{History, HistoryPoint};
use super::random::RandomSource;
use super::scenario::{Scenario, apply_scenario};
use super::stats::{GridStats, NOMINAL_FREQUENCY_HZ};
use super::tick::drift_registry;
use super::types::SimConfig;

/// Label used for the scenario context when no scenario is active.
pub const NORMAL_OPERATION: &str = "normal";

/// Last advisory text and the grid picture it was asked about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    /// Advice returned by the collaborator, or the fallback.
    pub text: String,
    /// Simulated time the request was made (ms).
    pub requested_at_ms: u64,
    /// Statistics the request was built from.
    pub stats_at_request: GridStats,
}

/// Everything the dashboard reads, as one value.
///
/// Transitions take `self` by value and return the successor, so a holder
/// that swaps the whole value never exposes a half-updated fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    config: SimConfig,
    registry: Registry,
    history: History,
    events: EventLog,
    active_scenario: Option<Scenario>,
    tick_count: u64,
    frequency_hz: f64,
    advice: Option<Advice>,
}

/// An empty grid: no assets, no history, no events.
///
/// Holders use it as the placeholder while a transition owns the real
/// state.
impl Default for GridState {
    fn default() -> Self {
        let config = SimConfig::default();
        Self {
            history: History::new(config.history_len),
            registry: Registry::new(Vec::new()),
            events: EventLog::new(config.event_log_len),
            active_scenario: None,
            tick_count: 0,
            frequency_hz: NOMINAL_FREQUENCY_HZ,
            advice: None,
            config,
        }
    }
}

impl GridState {
    /// Creates the initial state from a seed fleet.
    pub fn new(seed: Vec<Asset>, config: SimConfig) -> Self {
        let mut events = EventLog::new(config.event_log_len);
        events.record(
            0,
            EventLevel::Info,
            format!("System initialized: {} assets online", seed.len()),
        );
        Self {
            history: History::new(config.history_len),
            registry: Registry::new(seed),
            events,
            active_scenario: None,
            tick_count: 0,
            frequency_hz: NOMINAL_FREQUENCY_HZ,
            advice: None,
            config,
        }
    }

    /// Advances one tick: drift every asset, resample frequency, record history.
    pub fn tick(mut self, rng: &mut impl RandomSource) -> Self {
        self.registry = drift_registry(self.registry, self.config.fluctuation_mw, rng);
        let jitter = rng.symmetric(self.config.frequency_jitter_hz);
        self.frequency_hz = ((NOMINAL_FREQUENCY_HZ + jitter) * 100.0).round() / 100.0;
        self.tick_count += 1;

        let stats = self.stats();
        let point = HistoryPoint::from_stats(self.elapsed_ms(), &stats);
        self.history.push(point);
        debug!(
            tick = self.tick_count,
            generation = stats.total_generation,
            consumption = stats.total_consumption,
            net = stats.net_load,
            frequency = self.frequency_hz,
            "tick"
        );
        self
    }

    /// Applies `scenario` to the whole fleet and logs it.
    ///
    /// [`Scenario::Reset`] restores the seed fleet and clears the active
    /// scenario; history and the event log are kept.
    pub fn apply_scenario(mut self, scenario: Scenario) -> Self {
        self.registry = apply_scenario(self.registry, scenario);
        self.active_scenario = match scenario {
            Scenario::Reset => None,
            other => Some(other),
        };
        let level = match scenario {
            Scenario::Blackout => EventLevel::Critical,
            Scenario::Storm | Scenario::Heatwave => EventLevel::Warning,
            Scenario::Reset => EventLevel::Info,
        };
        let now = self.elapsed_ms();
        self.events.record(now, level, scenario.announcement());
        info!(%scenario, tick = self.tick_count, "scenario applied");
        self
    }

    /// Shorthand for `apply_scenario(Scenario::Reset)`.
    pub fn reset(self) -> Self {
        self.apply_scenario(Scenario::Reset)
    }

    /// Stores the latest advice, whatever tick the state has reached since.
    pub fn with_advice(mut self, advice: Advice) -> Self {
        let now = self.elapsed_ms();
        let preview: String = advice.text.chars().take(80).collect();
        self.events.record(now, EventLevel::Info, format!("Advisory: {preview}"));
        self.advice = Some(advice);
        self
    }

    /// Fresh statistics for the current fleet.
    pub fn stats(&self) -> GridStats {
        GridStats::from_assets(self.registry.assets(), self.frequency_hz)
    }

    /// Current assets.
    pub fn assets(&self) -> &[Asset] {
        self.registry.assets()
    }

    /// Underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Bounded tick history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Bounded event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Scenario currently in force, `None` after reset.
    pub fn active_scenario(&self) -> Option<Scenario> {
        self.active_scenario
    }

    /// Active scenario name, or [`NORMAL_OPERATION`].
    pub fn scenario_label(&self) -> &'static str {
        self.active_scenario.map_or(NORMAL_OPERATION, Scenario::as_str)
    }

    /// Ticks applied so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated elapsed time (ms).
    pub fn elapsed_ms(&self) -> u64 {
        self.config.elapsed_ms(self.tick_count)
    }

    /// Last sampled frequency (Hz).
    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    /// Latest advice, if any was requested.
    pub fn advice(&self) -> Option<&Advice> {
        self.advice.as_ref()
    }

    /// Simulation parameters.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
