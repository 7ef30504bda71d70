//! Assets Bounded Context

mod asset;

pub use asset::{Asset, AssetCategory};
