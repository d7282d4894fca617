//! Headless simulation loop: scripted scenarios plus ticks from a `TickSource`.

use crate::sim::GridState;
use crate::sim::clock::TickSource;
use crate::sim::event::{ScriptedEvent, due_at};
use crate::sim::random::RandomSource;

/// Drives `state` until `ticks` is exhausted.
///
/// Before tick `n` runs, every event scheduled at `n` is applied in
/// declaration order. `on_tick` sees the state after each tick.
pub fn run_scripted(
    mut state: GridState,
    ticks: &mut impl TickSource,
    rng: &mut impl RandomSource,
    events: &[ScriptedEvent],
    mut on_tick: impl FnMut(&GridState),
) -> GridState {
    while let Some(t) = ticks.next_tick() {
        for scenario in due_at(events, t) {
            state = state.apply_scenario(scenario);
        }
        state = state.tick(rng);
        on_tick(&state);
    }
    state
}
