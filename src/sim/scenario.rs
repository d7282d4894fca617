//! Named bulk perturbations applied to the whole fleet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{Asset, AssetStatus, AssetType, Registry};

/// A discrete, user-triggered grid event.
///
/// Names are matched case-insensitively wherever they come from (CLI,
/// config file, API path); they are always written lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Scenario {
    /// Solar and building loads pushed near capacity.
    Heatwave,
    /// Wind runs hard under warning, solar collapses.
    Storm,
    /// Everything but storage goes offline; storage discharges at half rate.
    Blackout,
    /// Restore the seed fleet.
    Reset,
}

/// Returned when a scenario name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario \"{0}\", available: heatwave, storm, blackout, reset")]
pub struct ParseScenarioError(pub String);

impl Scenario {
    /// All scenarios, in trigger-menu order.
    pub const ALL: [Scenario; 4] = [
        Scenario::Heatwave,
        Scenario::Storm,
        Scenario::Blackout,
        Scenario::Reset,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Heatwave => "heatwave",
            Scenario::Storm => "storm",
            Scenario::Blackout => "blackout",
            Scenario::Reset => "reset",
        }
    }

    /// One-line operator-facing description, used for the event log.
    pub fn announcement(self) -> &'static str {
        match self {
            Scenario::Heatwave => "Heatwave: solar at 95% and building cooling load at 90% of capacity",
            Scenario::Storm => "Storm: wind at 80% under warning, solar down to 10%",
            Scenario::Blackout => "Blackout: all non-storage assets offline, batteries discharging at 50%",
            Scenario::Reset => "Grid reset to baseline configuration",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heatwave" => Ok(Scenario::Heatwave),
            "storm" => Ok(Scenario::Storm),
            "blackout" => Ok(Scenario::Blackout),
            "reset" => Ok(Scenario::Reset),
            _ => Err(ParseScenarioError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Scenario {
    type Error = ParseScenarioError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Target state of one asset under `scenario`.
///
/// `seed` is the asset's creation-time record and is only read for
/// [`Scenario::Reset`]. Values are targets, not deltas, so reapplying a
/// scenario is a no-op.
pub fn transform_asset(scenario: Scenario, asset: &Asset, seed: &Asset) -> Asset {
    let cap = asset.capacity;
    let current = asset.clone();
    match (scenario, asset.asset_type) {
        (Scenario::Heatwave, AssetType::Solar) => current.with_output(0.95 * cap),
        (Scenario::Heatwave, AssetType::Building) => current.with_output(0.90 * cap),
        (Scenario::Storm, AssetType::Wind) => current
            .with_output(0.80 * cap)
            .with_status(AssetStatus::Warning),
        (Scenario::Storm, AssetType::Solar) => current.with_output(0.10 * cap),
        (Scenario::Blackout, AssetType::Battery) => current.with_output(0.50 * cap),
        (Scenario::Blackout, _) => current
            .with_output(0.0)
            .with_status(AssetStatus::Offline),
        (Scenario::Reset, _) => seed.clone(),
        _ => current,
    }
}

/// Applies `scenario` to every asset in the registry.
pub fn apply_scenario(registry: Registry, scenario: Scenario) -> Registry {
    registry.map_with_seed(|asset, seed| transform_asset(scenario, asset, seed))
}
