//! Scenario triggers scheduled at a given tick.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use super::scenario::{ParseScenarioError, Scenario};

/// A scenario to apply just before tick `at_tick` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedEvent {
    /// Tick index (0-based) the scenario fires before.
    pub at_tick: u64,
    /// Scenario to apply.
    pub scenario: Scenario,
}

/// Error parsing a `<tick>:<scenario>` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptedEventParseError {
    /// Missing `:` separator.
    #[error("expected <tick>:<scenario>, got \"{0}\"")]
    Format(String),
    /// Tick is not an unsigned integer.
    #[error("invalid tick \"{0}\"")]
    Tick(String),
    /// Unknown scenario name.
    #[error(transparent)]
    Scenario(#[from] ParseScenarioError),
}

impl ScriptedEvent {
    /// Creates an event firing before `at_tick`.
    pub fn new(at_tick: u64, scenario: Scenario) -> Self {
        Self { at_tick, scenario }
    }

    /// Returns `true` when this event fires before tick `tick`.
    pub fn fires_at(&self, tick: u64) -> bool {
        self.at_tick == tick
    }
}

impl fmt::Display for ScriptedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.at_tick, self.scenario)
    }
}

impl FromStr for ScriptedEvent {
    type Err = ScriptedEventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, name) = s
            .split_once(':')
            .ok_or_else(|| ScriptedEventParseError::Format(s.to_string()))?;
        let at_tick = tick
            .trim()
            .parse::<u64>()
            .map_err(|_| ScriptedEventParseError::Tick(tick.to_string()))?;
        let scenario = name.parse::<Scenario>()?;
        Ok(Self { at_tick, scenario })
    }
}

/// Scenarios scheduled for `tick`, in declaration order.
pub fn due_at(events: &[ScriptedEvent], tick: u64) -> impl Iterator<Item = Scenario> + '_ {
    events
        .iter()
        .filter(move |e| e.fires_at(tick))
        .map(|e| e.scenario)
}
