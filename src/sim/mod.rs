/// Tick scheduling.
pub mod clock;
pub mod engine;
/// Scenario triggers scheduled by tick.
pub mod event;
pub mod event_log;
pub mod history;
pub mod random;
/// Fleet-wide scenario transformations.
pub mod scenario;
pub mod stats;
pub mod tick;
pub mod types;

pub use engine::{Advice, GridState};
pub use scenario::Scenario;
pub use stats::GridStats;
