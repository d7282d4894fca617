//! Asset record and its closed variant sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of grid entity an asset represents.
///
/// The set is closed: every simulation and aggregation rule matches on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    /// Photovoltaic generation.
    Solar,
    /// Wind turbine generation.
    Wind,
    /// Stationary storage; positive output discharges, negative charges.
    Battery,
    /// Commercial building load.
    Building,
    /// Industrial load.
    Factory,
    /// Electric vehicle charging station load.
    EvStation,
}

/// Aggregation bucket an asset type contributes to.
///
/// Each type maps to exactly one class so no asset is ever counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    /// Output counts towards total generation.
    Generation,
    /// Output counts towards total consumption.
    Consumption,
    /// Sign decides: positive is generation, negative is consumption.
    Storage,
}

impl AssetType {
    /// All variants, in display order.
    pub const ALL: [AssetType; 6] = [
        AssetType::Solar,
        AssetType::Wind,
        AssetType::Battery,
        AssetType::Building,
        AssetType::Factory,
        AssetType::EvStation,
    ];

    /// Returns the aggregation class for this type.
    pub fn class(self) -> AssetClass {
        match self {
            AssetType::Solar | AssetType::Wind => AssetClass::Generation,
            AssetType::Building | AssetType::Factory | AssetType::EvStation => {
                AssetClass::Consumption
            }
            AssetType::Battery => AssetClass::Storage,
        }
    }

    /// Wire/display label (`"ev-station"` etc.).
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Solar => "solar",
            AssetType::Wind => "wind",
            AssetType::Battery => "battery",
            AssetType::Building => "building",
            AssetType::Factory => "factory",
            AssetType::EvStation => "ev-station",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational state of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// Normal operation; participates in tick fluctuation.
    Active,
    /// Disconnected; output is frozen and skipped by ticks.
    Offline,
    /// Operating under stress.
    Warning,
}

impl AssetStatus {
    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Offline => "offline",
            AssetStatus::Warning => "warning",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One managed grid entity.
///
/// `id`, `capacity`, `x` and `y` are fixed for the asset's lifetime; only
/// `current_output` and `status` change between registry states.
///
/// # Power Convention
/// Outputs are magnitudes in MW. For batteries a negative value means the
/// asset is charging (drawing from the grid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique, stable identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Variant from the closed type set.
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Upper bound on output magnitude (MW, >= 0).
    pub capacity: f64,
    /// Present output (MW).
    pub current_output: f64,
    /// Operational state.
    pub status: AssetStatus,
    /// Map position in [0, 100].
    pub x: f64,
    /// Map position in [0, 100].
    pub y: f64,
}

impl Asset {
    /// Creates an active asset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        asset_type: AssetType,
        capacity: f64,
        current_output: f64,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_type,
            capacity,
            current_output,
            status: AssetStatus::Active,
            x,
            y,
        }
    }

    /// Returns a copy with `status` replaced.
    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns a copy with `current_output` replaced.
    pub fn with_output(mut self, current_output: f64) -> Self {
        self.current_output = current_output;
        self
    }

    /// Output as a fraction of capacity, `0.0` for zero-capacity assets.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0.0 {
            self.current_output.abs() / self.capacity
        } else {
            0.0
        }
    }

    /// `true` when `|current_output| <= capacity`.
    pub fn within_capacity(&self) -> bool {
        self.current_output.abs() <= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_exactly_one_class() {
        let generation: Vec<_> = AssetType::ALL
            .iter()
            .filter(|t| t.class() == AssetClass::Generation)
            .collect();
        let storage: Vec<_> = AssetType::ALL
            .iter()
            .filter(|t| t.class() == AssetClass::Storage)
            .collect();
        assert_eq!(generation, vec![&AssetType::Solar, &AssetType::Wind]);
        assert_eq!(storage, vec![&AssetType::Battery]);
    }

    #[test]
    fn ev_station_serializes_kebab_case() {
        let json = serde_json::to_string(&AssetType::EvStation).unwrap();
        assert_eq!(json, "\"ev-station\"");
        assert_eq!(AssetType::EvStation.to_string(), "ev-station");
    }

    #[test]
    fn asset_uses_type_and_camel_case_fields() {
        let asset = Asset::new("b1", "Bank", AssetType::Battery, 40.0, -12.0, 50.0, 50.0);
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "battery");
        assert_eq!(json["currentOutput"], -12.0);
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn utilization_uses_magnitude() {
        let asset = Asset::new("b1", "Bank", AssetType::Battery, 40.0, -10.0, 0.0, 0.0);
        assert!((asset.utilization() - 0.25).abs() < 1e-12);
        assert!(asset.within_capacity());
        let empty = Asset::new("z", "Zero", AssetType::Solar, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(empty.utilization(), 0.0);
    }
}
