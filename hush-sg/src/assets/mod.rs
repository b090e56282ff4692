//! Asset persistence

mod store;

pub use store::{AssetKind, AssetReference, AssetStore};
