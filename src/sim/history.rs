//! Bounded chronological series of per-tick load snapshots.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use super::stats::GridStats;

/// Default number of retained history points.
pub const DEFAULT_HISTORY_LEN: usize = 20;

/// One snapshot appended per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryPoint {
    /// Simulated elapsed time at the tick (ms).
    pub timestamp_ms: u64,
    /// Total generation (MW).
    pub generation: f64,
    /// Total consumption (MW).
    pub consumption: f64,
    /// Net load (MW).
    pub net: f64,
}

impl HistoryPoint {
    /// Snapshot of `stats` at `timestamp_ms`.
    pub fn from_stats(timestamp_ms: u64, stats: &GridStats) -> Self {
        Self {
            timestamp_ms,
            generation: stats.total_generation,
            consumption: stats.total_consumption,
            net: stats.net_load,
        }
    }
}

impl fmt::Display for HistoryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>7.1}s | gen={:>6.1} MW  cons={:>6.1} MW  net={:>6.1} MW",
            self.timestamp_ms as f64 / 1000.0,
            self.generation,
            self.consumption,
            self.net,
        )
    }
}

/// Ring-like buffer keeping the most recent `capacity` points.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    points: VecDeque<HistoryPoint>,
    capacity: usize,
}

impl History {
    /// Creates an empty history holding at most `capacity` points (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// Appends `point`, dropping from the front past the bound.
    pub fn push(&mut self, point: HistoryPoint) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Points oldest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryPoint> + ExactSizeIterator {
        self.points.iter()
    }

    /// Owned copy of the points, oldest-first.
    pub fn to_vec(&self) -> Vec<HistoryPoint> {
        self.points.iter().copied().collect()
    }

    /// Most recent point.
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Number of retained points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` before the first tick.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: u64) -> HistoryPoint {
        HistoryPoint {
            timestamp_ms: t,
            generation: 1.0,
            consumption: 2.0,
            net: 1.0,
        }
    }

    #[test]
    fn keeps_most_recent_in_order() {
        let mut h = History::new(DEFAULT_HISTORY_LEN);
        for t in 0..25 {
            h.push(point(t));
        }
        assert_eq!(h.len(), 20);
        let stamps: Vec<u64> = h.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(stamps, (5..25).collect::<Vec<_>>());
        assert_eq!(h.latest().map(|p| p.timestamp_ms), Some(24));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut h = History::new(0);
        h.push(point(1));
        h.push(point(2));
        assert_eq!(h.len(), 1);
        assert_eq!(h.to_vec(), vec![point(2)]);
    }

    #[test]
    fn display_shows_seconds() {
        let s = format!("{}", point(3000));
        assert!(s.contains("3.0s"), "{s}");
    }
}
