//! Per-tick random drift of asset outputs.

use crate::assets::{Asset, AssetStatus, Registry};

use super::random::RandomSource;

/// Default drift magnitude per tick (MW).
pub const DEFAULT_FLUCTUATION_MW: f64 = 1.0;

/// Drifts one asset by a draw in `[-fluctuation, +fluctuation]`.
///
/// The result is clamped to `[0, capacity]`. A charging battery (negative
/// output) therefore snaps to zero or above on its first drift; that
/// asymmetry is the established behavior of the model and is kept as is.
/// Offline assets are returned unchanged and consume no draw.
pub fn drift_asset(asset: &Asset, fluctuation: f64, rng: &mut impl RandomSource) -> Asset {
    if asset.status == AssetStatus::Offline {
        return asset.clone();
    }
    let delta = rng.symmetric(fluctuation);
    let next = (asset.current_output + delta).clamp(0.0, asset.capacity.max(0.0));
    asset.clone().with_output(next)
}

/// Advances every asset in the registry by one drift step.
pub fn drift_registry(registry: Registry, fluctuation: f64, rng: &mut impl RandomSource) -> Registry {
    registry.map_each(|a| drift_asset(a, fluctuation, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetType;
    use crate::assets::seed::default_fleet;
    use crate::sim::random::ScriptedSource;

    fn solar(output: f64) -> Asset {
        Asset::new("s", "Solar", AssetType::Solar, 50.0, output, 0.0, 0.0)
    }

    #[test]
    fn adds_scaled_delta() {
        let mut rng = ScriptedSource::new(vec![0.5]);
        let next = drift_asset(&solar(35.0), 1.0, &mut rng);
        assert_eq!(next.current_output, 35.5);
    }

    #[test]
    fn clamps_at_capacity() {
        let mut rng = ScriptedSource::new(vec![1.0]);
        let next = drift_asset(&solar(49.8), 1.0, &mut rng);
        assert_eq!(next.current_output, 50.0);
    }

    #[test]
    fn clamps_at_zero() {
        let mut rng = ScriptedSource::new(vec![-1.0]);
        let next = drift_asset(&solar(0.3), 1.0, &mut rng);
        assert_eq!(next.current_output, 0.0);
    }

    #[test]
    fn charging_battery_loses_negative_state() {
        let battery = Asset::new("b", "Bank", AssetType::Battery, 40.0, -12.0, 0.0, 0.0);
        let mut rng = ScriptedSource::new(vec![0.5]);
        let next = drift_asset(&battery, 1.0, &mut rng);
        assert_eq!(next.current_output, 0.0);
    }

    #[test]
    fn offline_assets_are_frozen_and_skip_draws() {
        let offline = solar(0.0).with_status(AssetStatus::Offline);
        let mut rng = ScriptedSource::new(vec![1.0]);
        let next = drift_asset(&offline, 1.0, &mut rng);
        assert_eq!(next, offline);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn registry_drift_keeps_every_asset_in_bounds() {
        let mut rng = ScriptedSource::new(vec![1.0, -1.0, 0.25, -0.75]);
        let mut reg = Registry::new(default_fleet());
        for _ in 0..100 {
            reg = drift_registry(reg, 1.0, &mut rng);
            for a in reg.assets() {
                assert!(a.current_output >= 0.0 && a.current_output <= a.capacity);
            }
        }
    }
}
