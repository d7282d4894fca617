//! Aggregate grid statistics derived from the current registry.

use std::fmt;

use serde::Serialize;

use crate::assets::{Asset, AssetClass};

/// Nominal grid frequency (Hz).
pub const NOMINAL_FREQUENCY_HZ: f64 = 50.0;

/// Reported storage level (%).
///
/// Not derived from battery states; a fixed figure until a real
/// state-of-charge model backs it.
pub const STORAGE_LEVEL_PCT: f64 = 85.0;

/// Rounds to one decimal place, halves rounding towards positive infinity.
///
/// `-0.0` is normalized to `0.0`.
pub fn round1(value: f64) -> f64 {
    let r = ((value * 10.0) + 0.5).floor() / 10.0;
    if r == 0.0 { 0.0 } else { r }
}

/// Aggregate figures shown alongside the asset map.
///
/// Computed fresh from a registry snapshot; never stored between reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    /// Generation plus discharging storage (MW, >= 0).
    pub total_generation: f64,
    /// Loads plus charging storage (MW, >= 0).
    pub total_consumption: f64,
    /// `total_consumption - total_generation` (MW).
    pub net_load: f64,
    /// See [`STORAGE_LEVEL_PCT`].
    pub storage_level: f64,
    /// Last sampled synthetic frequency (Hz).
    pub grid_frequency: f64,
}

impl GridStats {
    /// Aggregates `assets`, attaching the externally sampled `grid_frequency`.
    ///
    /// Each asset contributes to exactly one side according to its
    /// [`AssetClass`]; storage contributes by sign.
    pub fn from_assets(assets: &[Asset], grid_frequency: f64) -> Self {
        let mut generation = 0.0_f64;
        let mut consumption = 0.0_f64;

        for a in assets {
            match a.asset_type.class() {
                AssetClass::Generation => generation += a.current_output.max(0.0),
                AssetClass::Consumption => consumption += a.current_output.abs(),
                AssetClass::Storage => {
                    if a.current_output > 0.0 {
                        generation += a.current_output;
                    } else {
                        consumption += -a.current_output;
                    }
                }
            }
        }

        let total_generation = round1(generation);
        let total_consumption = round1(consumption);

        Self {
            total_generation,
            total_consumption,
            net_load: round1(total_consumption - total_generation),
            storage_level: STORAGE_LEVEL_PCT,
            grid_frequency,
        }
    }

    /// `true` when generation covers consumption.
    pub fn is_surplus(&self) -> bool {
        self.net_load <= 0.0
    }
}

impl fmt::Display for GridStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Grid Stats ---")?;
        writeln!(f, "Total generation:   {:.1} MW", self.total_generation)?;
        writeln!(f, "Total consumption:  {:.1} MW", self.total_consumption)?;
        writeln!(f, "Net load:           {:.1} MW", self.net_load)?;
        writeln!(f, "Storage level:      {:.0}%", self.storage_level)?;
        write!(f, "Grid frequency:     {:.2} Hz", self.grid_frequency)
    }
}
