//! Built-in six-asset fleet used when no `[[assets]]` are configured.

use super::types::{Asset, AssetType};

/// Returns the default seed fleet, one asset per type.
///
/// # Examples
///
/// ```
/// use vpp_dashboard::assets::seed::default_fleet;
///
/// let fleet = default_fleet();
/// assert_eq!(fleet.len(), 6);
/// assert_eq!(fleet[0].capacity, 50.0);
/// ```
pub fn default_fleet() -> Vec<Asset> {
    vec![
        Asset::new("solar-1", "Solar Farm Alpha", AssetType::Solar, 50.0, 35.0, 20.0, 30.0),
        Asset::new("wind-1", "Wind Park North", AssetType::Wind, 80.0, 42.0, 75.0, 15.0),
        // Seeded charging; the first tick clamps this to >= 0.
        Asset::new("battery-1", "Grid Battery Bank", AssetType::Battery, 40.0, -12.0, 50.0, 50.0),
        Asset::new(
            "building-1",
            "Downtown Office Block",
            AssetType::Building,
            25.0,
            18.0,
            35.0,
            70.0,
        ),
        Asset::new(
            "factory-1",
            "Riverside Steel Works",
            AssetType::Factory,
            60.0,
            45.0,
            80.0,
            75.0,
        ),
        Asset::new("ev-1", "Central EV Hub", AssetType::EvStation, 15.0, 8.0, 15.0, 80.0),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fleet_covers_every_type_once() {
        let fleet = default_fleet();
        let types: HashSet<_> = fleet.iter().map(|a| a.asset_type).collect();
        assert_eq!(types.len(), AssetType::ALL.len());
    }

    #[test]
    fn fleet_ids_are_unique_and_in_bounds() {
        let fleet = default_fleet();
        let ids: HashSet<_> = fleet.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), fleet.len());
        for a in &fleet {
            assert!(a.within_capacity(), "{} exceeds capacity", a.id);
            assert!((0.0..=100.0).contains(&a.x) && (0.0..=100.0).contains(&a.y));
        }
    }
}
