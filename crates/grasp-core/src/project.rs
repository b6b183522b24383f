//! Scene snapshot serialization (`.grasp` files).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scene::{Scene, SceneParams};

/// File extension for scene snapshots.
pub const SNAPSHOT_EXTENSION: &str = "grasp";

/// A saved scene: the full box collection plus the parameters it was built
/// from, so a reload can both restore the exact poses and rebuild fresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// File format version
    pub version: u32,
    /// Parameters the scene was originally built with
    pub params: SceneParams,
    /// The box collection, including current poses
    pub scene: Scene,
}

impl Snapshot {
    /// Captures the current scene.
    pub fn capture(params: SceneParams, scene: Scene) -> Self {
        Self {
            version: 1,
            params,
            scene,
        }
    }

    /// Save snapshot to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize snapshot to bytes (for WASM support)
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SnapshotError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load snapshot from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SnapshotError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| SnapshotError::Deserialize(e.to_string()))
    }

    /// Load snapshot from bytes (for WASM support)
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        let content =
            std::str::from_utf8(data).map_err(|e| SnapshotError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| SnapshotError::Deserialize(e.to_string()))
    }
}

/// Snapshot-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_snapshot_round_trip_through_file() {
        let params = SceneParams {
            movable_count: 3,
            ..Default::default()
        };
        let mut scene = Scene::build_demo(&params);
        scene.movable_boxes_mut()[0].translation = Vec3::new(0.1, 0.9, -0.2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.grasp");

        Snapshot::capture(params, scene.clone()).save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.scene, scene);
        assert_eq!(loaded.params.movable_count, 3);
    }

    #[test]
    fn test_snapshot_round_trip_through_bytes() {
        let params = SceneParams::default();
        let scene = Scene::build_demo(&params);
        let bytes = Snapshot::capture(params, scene.clone())
            .to_bytes()
            .unwrap();
        let loaded = Snapshot::load_from_bytes(&bytes).unwrap();
        assert_eq!(loaded.scene, scene);
    }

    #[test]
    fn test_malformed_snapshot_is_an_error_not_a_panic() {
        assert!(matches!(
            Snapshot::load_from_bytes(b"(version: \"not a number\")"),
            Err(SnapshotError::Deserialize(_))
        ));
        assert!(matches!(
            Snapshot::load_from_bytes(&[0xff, 0xfe]),
            Err(SnapshotError::Deserialize(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        assert!(matches!(
            Snapshot::load("/nonexistent/scene.grasp"),
            Err(SnapshotError::Io(_))
        ));
    }
}
