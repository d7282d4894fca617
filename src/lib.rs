//! Virtual power plant grid dashboard.
//!
//! A fleet of generation, storage and consumption assets drifts tick by
//! tick, reacts to grid scenarios and is summarized into grid statistics.

pub mod advisory;
/// Fleet records and the registry that owns them.
pub mod assets;
pub mod cli;
pub mod config;
pub mod io;
pub mod runner;
/// Grid state, ticks, scenarios and aggregation.
pub mod sim;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
