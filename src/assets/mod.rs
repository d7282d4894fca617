//! Asset records and the registry that holds them.

/// Ordered asset collection.
pub mod registry;
/// Built-in seed fleet.
pub mod seed;
pub mod types;

pub use registry::Registry;
pub use types::{Asset, AssetClass, AssetStatus, AssetType};
