//! Tick scheduling decoupled from wall-clock time.

use std::thread;
use std::time::Duration;

/// Default interval between ticks (ms).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3000;

/// Something that yields tick indices until it is exhausted.
///
/// The simulation handler only ever sees the index; whether a source
/// sleeps between ticks is its own business.
pub trait TickSource {
    /// Blocks (if needed) until the next tick and returns its index.
    ///
    /// Returns `None` when the source has no more ticks.
    fn next_tick(&mut self) -> Option<u64>;

    /// Runs `handler` for every remaining tick.
    fn drive(&mut self, mut handler: impl FnMut(u64))
    where
        Self: Sized,
    {
        while let Some(step) = self.next_tick() {
            handler(step);
        }
    }
}

/// A bounded step counter that ticks immediately.
///
/// # Examples
///
/// ```
/// use vpp_dashboard::sim::clock::{Clock, TickSource};
///
/// let mut clock = Clock::new(3);
/// let mut steps = Vec::new();
///
/// clock.drive(|step| steps.push(step));
/// assert_eq!(steps, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Next tick index.
    current: u64,
    /// Total ticks to produce.
    total: u64,
}

impl Clock {
    /// Creates a clock producing `total` ticks.
    pub fn new(total: u64) -> Self {
        Self { current: 0, total }
    }

    /// Ticks produced so far.
    pub fn elapsed(&self) -> u64 {
        self.current
    }
}

impl TickSource for Clock {
    fn next_tick(&mut self) -> Option<u64> {
        if self.current < self.total {
            let step = self.current;
            self.current += 1;
            Some(step)
        } else {
            None
        }
    }
}

/// Wraps another source and sleeps `interval` before every tick after the first.
///
/// Used by the headless runner when pacing output in real time.
#[derive(Debug, Clone)]
pub struct Paced<S> {
    inner: S,
    interval: Duration,
    started: bool,
}

impl<S: TickSource> Paced<S> {
    /// Paces `inner` at `interval`.
    pub fn new(inner: S, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            started: false,
        }
    }
}

impl<S: TickSource> TickSource for Paced<S> {
    fn next_tick(&mut self) -> Option<u64> {
        let step = self.inner.next_tick()?;
        if self.started {
            thread::sleep(self.interval);
        }
        self.started = true;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(5);
        assert_eq!(clock.current, 0);
        assert_eq!(clock.total, 5);
    }

    #[test]
    fn test_tick() {
        let mut clock = Clock::new(2);
        assert_eq!(clock.next_tick(), Some(0));
        assert_eq!(clock.next_tick(), Some(1));
        assert_eq!(clock.next_tick(), None);
        assert_eq!(clock.elapsed(), 2);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::new(0);
        let mut was_called = false;
        clock.drive(|_| was_called = true);
        assert!(!was_called);
    }

    #[test]
    fn paced_clock_yields_same_indices() {
        let mut paced = Paced::new(Clock::new(3), Duration::from_millis(1));
        let mut steps = Vec::new();
        paced.drive(|s| steps.push(s));
        assert_eq!(steps, vec![0, 1, 2]);
    }
}
