//! TOML-based dashboard configuration.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::assets::seed::default_fleet;
use crate::assets::{Asset, AssetClass, AssetStatus, AssetType};
use crate::sim::clock::DEFAULT_TICK_INTERVAL_MS;
use crate::sim::event::ScriptedEvent;
use crate::sim::event_log::DEFAULT_EVENT_LOG_LEN;
use crate::sim::history::DEFAULT_HISTORY_LEN;
use crate::sim::tick::DEFAULT_FLUCTUATION_MW;
use crate::sim::types::{DEFAULT_FREQUENCY_JITTER_HZ, SimConfig};

/// Top-level configuration parsed from TOML.
///
/// Every section is optional. An empty file yields the built-in fleet with
/// default simulation parameters and no scripted events.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Tick timing and randomness.
    pub simulation: SimulationConfig,
    /// Advisory collaborator settings.
    pub advisory: AdvisoryConfig,
    /// Seed fleet override. `None` uses the built-in fleet.
    pub assets: Option<Vec<AssetConfig>>,
    /// Scenarios applied before given ticks in headless runs.
    pub events: Vec<ScriptedEvent>,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Interval between ticks (ms, must be > 0).
    pub tick_interval_ms: u64,
    /// Per-tick drift half-width (MW, must be >= 0).
    pub fluctuation_mw: f64,
    /// Frequency jitter half-width (Hz, must be >= 0).
    pub frequency_jitter_hz: f64,
    /// Retained history points (must be > 0).
    pub history_len: usize,
    /// Retained event log entries (must be > 0).
    pub event_log_len: usize,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            fluctuation_mw: DEFAULT_FLUCTUATION_MW,
            frequency_jitter_hz: DEFAULT_FREQUENCY_JITTER_HZ,
            history_len: DEFAULT_HISTORY_LEN,
            event_log_len: DEFAULT_EVENT_LOG_LEN,
            seed: None,
        }
    }
}

/// `[advisory]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisoryConfig {
    /// Base URL of the generative language API.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

/// One `[[assets]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub capacity: f64,
    pub current_output: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default = "active")]
    pub status: AssetStatus,
}

/// `false` for negative values and NaN.
fn non_negative(v: f64) -> bool {
    v >= 0.0
}

fn active() -> AssetStatus {
    AssetStatus::Active
}

impl From<&AssetConfig> for Asset {
    fn from(c: &AssetConfig) -> Self {
        Asset::new(
            c.id.clone(),
            c.name.clone(),
            c.asset_type,
            c.capacity,
            c.current_output,
            c.x,
            c.y,
        )
        .with_status(c.status)
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.history_len"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl DashboardConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Simulation parameters for [`GridState`](crate::sim::GridState).
    pub fn sim_config(&self) -> SimConfig {
        let s = &self.simulation;
        SimConfig {
            tick_interval_ms: s.tick_interval_ms,
            fluctuation_mw: s.fluctuation_mw,
            frequency_jitter_hz: s.frequency_jitter_hz,
            history_len: s.history_len,
            event_log_len: s.event_log_len,
        }
    }

    /// Seed fleet: the `[[assets]]` entries, or the built-in fleet.
    pub fn fleet(&self) -> Vec<Asset> {
        match &self.assets {
            Some(list) => list.iter().map(Asset::from).collect(),
            None => default_fleet(),
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.tick_interval_ms == 0 {
            errors.push(ConfigError::new("simulation.tick_interval_ms", "must be > 0"));
        }
        if !non_negative(s.fluctuation_mw) {
            errors.push(ConfigError::new("simulation.fluctuation_mw", "must be >= 0"));
        }
        if !non_negative(s.frequency_jitter_hz) {
            errors.push(ConfigError::new(
                "simulation.frequency_jitter_hz",
                "must be >= 0",
            ));
        }
        if s.history_len == 0 {
            errors.push(ConfigError::new("simulation.history_len", "must be > 0"));
        }
        if s.event_log_len == 0 {
            errors.push(ConfigError::new("simulation.event_log_len", "must be > 0"));
        }
        if self.advisory.timeout_secs == 0 {
            errors.push(ConfigError::new("advisory.timeout_secs", "must be > 0"));
        }

        if let Some(list) = &self.assets {
            if list.is_empty() {
                errors.push(ConfigError::new("assets", "must contain at least one asset"));
            }
            let mut seen = HashSet::new();
            for (i, a) in list.iter().enumerate() {
                let at = |f: &str| format!("assets[{i}].{f}");
                if !seen.insert(a.id.as_str()) {
                    errors.push(ConfigError::new(at("id"), format!("duplicate id \"{}\"", a.id)));
                }
                if !non_negative(a.capacity) {
                    errors.push(ConfigError::new(at("capacity"), "must be >= 0"));
                }
                if !non_negative(a.capacity - a.current_output.abs()) {
                    errors.push(ConfigError::new(
                        at("current_output"),
                        "magnitude must be <= capacity",
                    ));
                } else if !non_negative(a.current_output) {
                    if a.asset_type.class() != AssetClass::Storage {
                        errors.push(ConfigError::new(
                            at("current_output"),
                            "must be >= 0 for non-storage assets",
                        ));
                    } else if a.status == AssetStatus::Offline {
                        // offline assets are never drifted or clamped
                        errors.push(ConfigError::new(
                            at("current_output"),
                            "must be >= 0 for offline assets",
                        ));
                    }
                }
                if !(0.0..=100.0).contains(&a.x) {
                    errors.push(ConfigError::new(at("x"), "must be in [0, 100]"));
                }
                if !(0.0..=100.0).contains(&a.y) {
                    errors.push(ConfigError::new(at("y"), "must be in [0, 100]"));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Scenario;

    #[test]
    fn empty_config_is_valid_default() {
        let cfg = DashboardConfig::from_toml_str("").unwrap();
        assert!(cfg.validate().is_empty());
        assert_eq!(cfg.sim_config(), SimConfig::default());
        assert_eq!(cfg.fleet(), default_fleet());
        assert!(cfg.events.is_empty());
        assert_eq!(cfg.simulation.seed, None);
    }

    #[test]
    fn full_toml_parses() {
        let toml = r#"
[simulation]
tick_interval_ms = 1000
fluctuation_mw = 0.5
history_len = 30
seed = 7

[advisory]
model = "gemini-test"
api_key_env = "MY_KEY"

[[assets]]
id = "pv"
name = "Roof PV"
type = "solar"
capacity = 5.0
current_output = 3.0
x = 10.0
y = 10.0

[[assets]]
id = "hub"
name = "EV Hub"
type = "ev-station"
capacity = 4.0
current_output = 1.0
x = 90.0
y = 90.0
status = "warning"

[[events]]
at_tick = 3
scenario = "storm"
"#;
        let cfg = DashboardConfig::from_toml_str(toml).unwrap();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.sim_config().tick_interval_ms, 1000);
        assert_eq!(cfg.sim_config().history_len, 30);
        assert_eq!(cfg.simulation.seed, Some(7));
        assert_eq!(cfg.advisory.model, "gemini-test");
        assert_eq!(cfg.advisory.timeout_secs, 10);

        let fleet = cfg.fleet();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].status, AssetStatus::Active);
        assert_eq!(fleet[1].asset_type, AssetType::EvStation);
        assert_eq!(fleet[1].status, AssetStatus::Warning);
        assert_eq!(cfg.events, vec![ScriptedEvent::new(3, Scenario::Storm)]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
[simulation]
tick_interval_ms = 1000
bogus_field = true
"#;
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn unknown_scenario_in_events_is_rejected() {
        let toml = r#"
[[events]]
at_tick = 1
scenario = "flood"
"#;
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn event_scenarios_are_case_insensitive() {
        let toml = r#"
[[events]]
at_tick = 3
scenario = "Storm"
"#;
        let cfg = DashboardConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.events, vec![ScriptedEvent::new(3, Scenario::Storm)]);
        assert_eq!(cfg.events, vec!["3:Storm".parse::<ScriptedEvent>().unwrap()]);
    }

    #[test]
    fn validation_catches_zero_values() {
        let mut cfg = DashboardConfig::default();
        cfg.simulation.tick_interval_ms = 0;
        cfg.simulation.history_len = 0;
        cfg.simulation.fluctuation_mw = -1.0;
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"simulation.tick_interval_ms".to_string()));
        assert!(fields.contains(&"simulation.history_len".to_string()));
        assert!(fields.contains(&"simulation.fluctuation_mw".to_string()));
    }

    #[test]
    fn validation_checks_assets() {
        let asset = |id: &str, capacity: f64, output: f64, x: f64| AssetConfig {
            id: id.to_string(),
            name: id.to_string(),
            asset_type: AssetType::Battery,
            capacity,
            current_output: output,
            x,
            y: 50.0,
            status: AssetStatus::Active,
        };
        let cfg = DashboardConfig {
            assets: Some(vec![
                asset("a", 10.0, -10.0, 0.0),
                asset("a", -1.0, 0.0, 50.0),
                asset("b", 5.0, 6.0, 101.0),
            ]),
            ..DashboardConfig::default()
        };
        let fields: Vec<String> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "assets[1].id",
                "assets[1].capacity",
                "assets[1].current_output",
                "assets[2].current_output",
                "assets[2].x",
            ]
        );
    }

    #[test]
    fn validation_rejects_negative_seeds_that_never_clamp() {
        let toml = r#"
[[assets]]
id = "plant"
name = "Plant"
type = "factory"
capacity = 10.0
current_output = -8.0
x = 10.0
y = 10.0

[[assets]]
id = "bank"
name = "Bank"
type = "battery"
capacity = 10.0
current_output = -8.0
x = 20.0
y = 20.0
status = "offline"

[[assets]]
id = "charging"
name = "Charging"
type = "battery"
capacity = 10.0
current_output = -8.0
x = 30.0
y = 30.0
"#;
        let cfg = DashboardConfig::from_toml_str(toml).unwrap();
        let errors = cfg.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["assets[0].current_output", "assets[1].current_output"]
        );
        assert!(errors[0].message.contains("non-storage"));
        assert!(errors[1].message.contains("offline"));
    }

    #[test]
    fn explicit_empty_fleet_is_invalid() {
        let cfg = DashboardConfig::from_toml_str("assets = []").unwrap();
        assert!(cfg.validate().iter().any(|e| e.field == "assets"));
    }
}
