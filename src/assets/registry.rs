//! Ordered asset collection swapped wholesale on every transition.

use std::sync::Arc;

use super::types::Asset;

/// The current ordered sequence of assets plus the seed it started from.
///
/// Transitions never edit in place: [`Registry::replace`] and
/// [`Registry::map_each`] consume the registry and return its successor.
/// The seed is shared between successors so [`Registry::reset`] is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    assets: Vec<Asset>,
    seed: Arc<[Asset]>,
}

impl Registry {
    /// Creates a registry whose current state equals `seed`.
    pub fn new(seed: Vec<Asset>) -> Self {
        Self {
            assets: seed.clone(),
            seed: seed.into(),
        }
    }

    /// Current assets, in seed order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// The seed values captured at creation.
    pub fn seed(&self) -> &[Asset] {
        &self.seed
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// `true` for an empty fleet.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Looks up an asset by id.
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Swaps in a whole new sequence.
    pub fn replace(self, assets: Vec<Asset>) -> Self {
        Self {
            assets,
            seed: self.seed,
        }
    }

    /// Applies `f` to every asset and returns the registry of results.
    ///
    /// `f` must keep each asset's identity: id, type, capacity and position.
    pub fn map_each(self, mut f: impl FnMut(&Asset) -> Asset) -> Self {
        let next = self
            .assets
            .iter()
            .map(|a| {
                let out = f(a);
                debug_assert_eq!(out.id, a.id, "transform must not change asset id");
                debug_assert_eq!(out.asset_type, a.asset_type);
                out
            })
            .collect();
        self.replace(next)
    }

    /// Like [`Registry::map_each`], also handing `f` the asset's seed record.
    ///
    /// Assets with no seed counterpart are paired with themselves.
    pub fn map_with_seed(self, mut f: impl FnMut(&Asset, &Asset) -> Asset) -> Self {
        let seed = Arc::clone(&self.seed);
        self.map_each(|a| {
            let original = seed.iter().find(|s| s.id == a.id).unwrap_or(a);
            f(a, original)
        })
    }

    /// Restores the seed values.
    pub fn reset(self) -> Self {
        let assets = self.seed.to_vec();
        self.replace(assets)
    }
}
