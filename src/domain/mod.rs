//! Domain - persisted data exchanged with the host

pub mod snapshot;
mod snapshot_bytes;

pub use snapshot::{Snapshot, SnapshotDocument};
pub use snapshot_bytes::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
