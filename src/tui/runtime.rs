//! TUI application state.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use tracing::warn;

use crate::advisory::{Advisor, AdvisoryRequest, FALLBACK_ADVICE, request_advice};
use crate::sim::random::StdSource;
use crate::sim::{Advice, GridState, Scenario};

/// Tick interval divisors (slowest → fastest).
const SPEED_DIVISORS: [u64; 5] = [1, 2, 4, 8, 16];

/// TUI application state.
pub struct App {
    grid: GridState,
    rng: StdSource,
    advisor: Arc<dyn Advisor>,
    pending_advice: Option<Receiver<Advice>>,
    /// Whether ticking is paused.
    pub paused: bool,
    /// Current index into `SPEED_DIVISORS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
}

impl App {
    /// Creates an app around an initial grid.
    pub fn new(grid: GridState, rng: StdSource, advisor: Arc<dyn Advisor>) -> Self {
        Self {
            grid,
            rng,
            advisor,
            pending_advice: None,
            paused: false,
            speed_idx: 0,
            quit: false,
            last_tick: Instant::now(),
        }
    }

    fn update(&mut self, f: impl FnOnce(GridState) -> GridState) {
        let current = std::mem::take(&mut self.grid);
        self.grid = f(current);
    }

    /// Current grid state.
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        let current = std::mem::take(&mut self.grid);
        self.grid = current.tick(&mut self.rng);
    }

    /// Applies a scenario.
    pub fn apply(&mut self, scenario: Scenario) {
        self.update(|grid| grid.apply_scenario(scenario));
    }

    /// Starts an advisory request on a worker thread.
    ///
    /// Ignored while a request is already in flight.
    pub fn request_advice(&mut self) {
        if self.pending_advice.is_some() {
            return;
        }
        let request = AdvisoryRequest::from_state(&self.grid);
        let stats = self.grid.stats();
        let at = self.grid.elapsed_ms();
        let advisor = Arc::clone(&self.advisor);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let advice = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(request_advice(advisor.as_ref(), request, stats, at)),
                Err(err) => {
                    warn!(%err, "advisory runtime unavailable");
                    Advice {
                        text: FALLBACK_ADVICE.to_string(),
                        requested_at_ms: at,
                        stats_at_request: stats,
                    }
                }
            };
            let _ = tx.send(advice);
        });
        self.pending_advice = Some(rx);
    }

    /// Stores a finished advisory response, if one has arrived.
    pub fn poll_advice(&mut self) {
        let Some(rx) = &self.pending_advice else {
            return;
        };
        match rx.try_recv() {
            Ok(advice) => {
                self.pending_advice = None;
                self.update(|grid| grid.with_advice(advice));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.pending_advice = None,
        }
    }

    /// Returns `true` while an advisory request is in flight.
    pub fn advice_pending(&self) -> bool {
        self.pending_advice.is_some()
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases simulation speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_DIVISORS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases simulation speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Wall-clock interval between ticks in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        (self.grid.config().tick_interval_ms / SPEED_DIVISORS[self.speed_idx]).max(1)
    }

    /// Speed multiplier shown in the header.
    pub fn speed_factor(&self) -> u64 {
        SPEED_DIVISORS[self.speed_idx]
    }
}
