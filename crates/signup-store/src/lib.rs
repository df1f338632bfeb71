//! Single source of truth for the multi-step registration flow.
//!
//! State is grouped into slices (navigation, form data, transient UI, API
//! progress, environment) mutated only through an explicit action surface.
//! The navigation/data/api slices persist to a versioned JSON snapshot;
//! transient UI state and environment config never do.

mod error;
mod persist;
mod state;
mod store;
mod types;

pub use error::StoreError;
pub use persist::{FileStore, Snapshot, SnapshotStore, SNAPSHOT_VERSION, STORE_NAME};
pub use state::StoreState;
pub use store::SignupStore;
pub use types::*;
