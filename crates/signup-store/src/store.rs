//! Shared store handle.
//!
//! Wraps the state behind `Arc<RwLock<_>>` so the flow code, the ticker and
//! the wizard can hold clones. Each `update` closure runs under the write
//! lock, so an action fully applies before the next one is processed.

use crate::error::StoreError;
use crate::persist::{Snapshot, SnapshotStore};
use crate::state::StoreState;
use crate::types::{EnvironmentConfig, Screen};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Cloneable handle to the registration store.
#[derive(Clone)]
pub struct SignupStore {
    state: Arc<RwLock<StoreState>>,
    snapshots: Arc<SnapshotStore>,
}

impl SignupStore {
    /// Open the store, hydrating from a persisted snapshot when one exists
    /// and is readable; anything else starts from defaults.
    pub async fn open(snapshots: SnapshotStore, environment: EnvironmentConfig) -> Self {
        let mut state = StoreState::new(environment);

        match snapshots.load().await {
            Ok(Some(snapshot)) => {
                info!("Rehydrating store from persisted snapshot");
                snapshot.apply(&mut state);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Failed to load snapshot, starting fresh: {}", e);
            }
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            snapshots: Arc::new(snapshots),
        }
    }

    /// Memory-only store with default environment, for tests and
    /// persistence-disabled runs.
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            snapshots: Arc::new(SnapshotStore::memory()),
        }
    }

    /// Read a view of the state.
    pub async fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    /// Apply one action atomically.
    pub async fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut state)
    }

    /// The currently visible screen.
    pub async fn screen(&self) -> Screen {
        self.read(|s| s.screen()).await
    }

    /// Persist the whitelisted slices.
    pub async fn save(&self) -> Result<(), StoreError> {
        let snapshot = {
            let state = self.state.read().await;
            Snapshot::capture(&state)
        };
        self.snapshots.save(&snapshot).await
    }

    /// Start over: reset every slice except the environment, and persist
    /// the cleared state.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.update(|s| s.reset()).await;
        self.save().await
    }
}
