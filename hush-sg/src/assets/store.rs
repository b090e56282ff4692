//! Flat-file asset store
//!
//! Manages the asset root directory with one subdirectory per asset kind.
//! Every write generates a fresh random identifier, so concurrent requests
//! never contend for a filename and no locking is required around writes.

use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Kind of persisted asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Frame,
    Audio,
    Video,
}

impl AssetKind {
    /// Subdirectory under the asset root for this kind
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Frame => "frames",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// File extension for this kind
    pub fn extension(self) -> &'static str {
        match self {
            Self::Frame => "png",
            Self::Audio => "wav",
            Self::Video => "mp4",
        }
    }
}

/// Reference to one persisted asset
///
/// Created at write time and never mutated. The relative path is derived
/// deterministically from kind + identifier + extension and is servable
/// as-is below the asset root.
#[derive(Debug, Clone, Serialize)]
pub struct AssetReference {
    pub kind: AssetKind,
    pub id: Uuid,
    pub relative_path: String,
}

/// Filesystem-backed asset store
///
/// Cheap to clone-by-Arc and safe to share across request tasks: writes use
/// fresh identifiers and the subdirectory layout is created once at startup.
#[derive(Debug)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Create a store rooted at `root`, creating the kind subdirectories
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for kind in [AssetKind::Frame, AssetKind::Audio, AssetKind::Video] {
            std::fs::create_dir_all(root.join(kind.subdir()))?;
        }
        Ok(Self { root })
    }

    /// Asset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a byte payload under a fresh identifier
    pub async fn write(&self, kind: AssetKind, bytes: &[u8]) -> Result<AssetReference> {
        let id = Uuid::new_v4();
        let relative_path = format!("{}/{}.{}", kind.subdir(), id, kind.extension());
        let absolute = self.root.join(&relative_path);

        tokio::fs::write(&absolute, bytes).await.map_err(|e| {
            Error::Asset(format!("Failed to write {}: {}", relative_path, e))
        })?;

        tracing::debug!(
            asset_id = %id,
            path = %relative_path,
            bytes = bytes.len(),
            "Asset persisted"
        );

        Ok(AssetReference {
            kind,
            id,
            relative_path,
        })
    }

    /// Absolute path for a previously returned relative path
    pub fn absolute_path(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_creates_file_under_kind_subdir() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path()).unwrap();

        let asset = store.write(AssetKind::Frame, b"not-really-a-png").await.unwrap();
        assert!(asset.relative_path.starts_with("frames/"));
        assert!(asset.relative_path.ends_with(".png"));

        let on_disk = std::fs::read(store.absolute_path(&asset.relative_path)).unwrap();
        assert_eq!(on_disk, b"not-really-a-png");
    }

    #[tokio::test]
    async fn identifiers_never_collide_across_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path()).unwrap();

        let a = store.write(AssetKind::Audio, b"a").await.unwrap();
        let b = store.write(AssetKind::Audio, b"b").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.relative_path, b.relative_path);
    }

    #[test]
    fn new_creates_all_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let _store = AssetStore::new(dir.path()).unwrap();
        for sub in ["frames", "audio", "video"] {
            assert!(dir.path().join(sub).is_dir());
        }
    }
}
