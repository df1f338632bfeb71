//! Versioned snapshot persistence.
//!
//! Only the whitelisted slices (`navigation`, `data`, `api`) cross the
//! persistence boundary. Snapshots carry a schema version; a mismatch
//! discards the stale snapshot rather than attempting migration.

use crate::error::StoreError;
use crate::state::StoreState;
use crate::types::{ApiState, DataSlices, NavigationState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

/// Fixed store name used for the default snapshot file.
pub const STORE_NAME: &str = "signup-store";

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted subset of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub navigation: NavigationState,
    pub data: DataSlices,
    pub api: ApiState,
}

impl Snapshot {
    /// Capture the persistable slices of a state.
    pub fn capture(state: &StoreState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            navigation: state.navigation.clone(),
            data: state.data.clone(),
            api: state.api.clone(),
        }
    }

    /// Merge the snapshot over a state's defaults. UI and environment are
    /// untouched.
    pub fn apply(self, state: &mut StoreState) {
        state.navigation = self.navigation;
        state.data = self.data;
        state.api = self.api;
    }
}

/// JSON-on-disk snapshot store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default snapshot path inside a data directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let mut path = dir.into();
        path.push(format!("{STORE_NAME}.json"));
        Self::new(path)
    }

    /// Persist a snapshot, writing atomically via temp file + rename.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Saved snapshot ({} bytes) to {:?}", data.len(), self.path);
        Ok(())
    }

    /// Load the persisted snapshot.
    ///
    /// Returns `None` when the file is missing, unreadable as JSON, or
    /// carries a different schema version; callers fall back to defaults.
    pub async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        if !self.path.exists() {
            debug!("No snapshot at {:?}, starting fresh", self.path);
            return Ok(None);
        }

        let data = fs::read(&self.path).await?;

        let snapshot: Snapshot = match serde_json::from_slice(&data) {
            Ok(s) => s,
            Err(e) => {
                warn!("Discarding unreadable snapshot at {:?}: {}", self.path, e);
                return Ok(None);
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "Discarding snapshot with schema version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            );
            return Ok(None);
        }

        info!("Loaded snapshot from {:?}", self.path);
        Ok(Some(snapshot))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Snapshot backend: file persistence or memory-only.
pub enum SnapshotStore {
    File(FileStore),
    /// No persistence; load yields defaults, save is a no-op.
    Memory,
}

impl SnapshotStore {
    pub fn file(path: PathBuf) -> Self {
        SnapshotStore::File(FileStore::new(path))
    }

    pub fn memory() -> Self {
        SnapshotStore::Memory
    }

    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        match self {
            SnapshotStore::File(store) => store.save(snapshot).await,
            SnapshotStore::Memory => {
                debug!("Memory snapshot store: save is a no-op");
                Ok(())
            }
        }
    }

    pub async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        match self {
            SnapshotStore::File(store) => store.load().await,
            SnapshotStore::Memory => Ok(None),
        }
    }
}
