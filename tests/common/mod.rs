//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use vpp_dashboard::assets::seed::default_fleet;
use vpp_dashboard::assets::{Asset, AssetStatus};
use vpp_dashboard::runner::run_scripted;
use vpp_dashboard::sim::GridState;
use vpp_dashboard::sim::clock::Clock;
use vpp_dashboard::sim::event::ScriptedEvent;
use vpp_dashboard::sim::random::StdSource;
use vpp_dashboard::sim::types::SimConfig;

/// Fresh grid over the built-in fleet with default parameters.
pub fn seed_state() -> GridState {
    GridState::new(default_fleet(), SimConfig::default())
}

/// Runs `ticks` seeded ticks over the built-in fleet.
pub fn run_seeded(seed: u64, ticks: u64, events: &[ScriptedEvent]) -> GridState {
    run_scripted(
        seed_state(),
        &mut Clock::new(ticks),
        &mut StdSource::seeded(seed),
        events,
        |_| {},
    )
}

/// Asset by id, panicking when absent.
pub fn asset<'a>(state: &'a GridState, id: &str) -> &'a Asset {
    state
        .registry()
        .get(id)
        .unwrap_or_else(|| panic!("asset {id} should exist"))
}

pub fn offline_count(state: &GridState) -> usize {
    state
        .assets()
        .iter()
        .filter(|a| a.status == AssetStatus::Offline)
        .count()
}
