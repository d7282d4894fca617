//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::assets::{AssetClass, AssetStatus, AssetType};
use crate::sim::event_log::EventLevel;

/// Generation line color.
pub const GENERATION_COLOR: Color = Color::Green;
/// Consumption line color.
pub const CONSUMPTION_COLOR: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Map marker color for an asset.
pub fn asset_color(asset_type: AssetType, status: AssetStatus) -> Color {
    if status == AssetStatus::Offline {
        return Color::DarkGray;
    }
    match asset_type.class() {
        AssetClass::Generation => Color::Yellow,
        AssetClass::Storage => Color::Cyan,
        AssetClass::Consumption => Color::Magenta,
    }
}

pub fn status_color(status: AssetStatus) -> Color {
    match status {
        AssetStatus::Active => Color::Green,
        AssetStatus::Warning => Color::Yellow,
        AssetStatus::Offline => Color::Red,
    }
}

pub fn level_color(level: EventLevel) -> Color {
    match level {
        EventLevel::Info => Color::Gray,
        EventLevel::Warning => Color::Yellow,
        EventLevel::Critical => Color::Red,
    }
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(generation: &[(f64, f64)], consumption: &[(f64, f64)]) -> [f64; 2] {
    let all = generation.iter().chain(consumption.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(1.0);
    let pad = range * 0.1;
    [(min - pad).max(0.0), max + pad]
}
