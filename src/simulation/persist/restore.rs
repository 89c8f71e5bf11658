use log::{debug, warn};

use crate::domain::snapshot::{self, Snapshot, SnapshotDocument};

use super::FieldFacade;

pub(super) fn snapshot(facade: &FieldFacade) -> Option<Snapshot> {
    facade.grid.as_deref().map(snapshot::capture)
}

/// Load a snapshot into the field.
///
/// Returns `false`, leaving the current field untouched, when the snapshot
/// is structurally invalid. A size or ambient change rebuilds the grid at
/// the snapshot's extent before temperatures are applied.
pub(super) fn restore_snapshot(facade: &mut FieldFacade, snapshot: &Snapshot) -> bool {
    let dims = match snapshot.dims() {
        Ok(dims) => dims,
        Err(err) => {
            warn!("{err}; keeping current thermal field");
            return false;
        }
    };

    let needs_rebuild = match &facade.grid {
        None => true,
        Some(grid) => {
            grid.dims() != dims || grid.ambient_temperature() != snapshot.ambient_temperature
        }
    };

    if needs_rebuild {
        debug!(
            "rebuilding thermal field for snapshot {}x{} @ {}",
            snapshot.width, snapshot.height, snapshot.ambient_temperature
        );
        if let Err(err) = facade.initialize(snapshot.width, snapshot.height, snapshot.ambient_temperature) {
            warn!("snapshot restore aborted: {err}");
            return false;
        }
    }

    let Some(grid) = facade.grid.as_deref_mut() else {
        return false;
    };
    match snapshot::apply(grid, snapshot) {
        Ok(()) => true,
        Err(err) => {
            warn!("snapshot restore failed: {err}");
            false
        }
    }
}

/// Lenient JSON restore; a missing `ambientTemperature` keeps the current one.
pub(super) fn restore_snapshot_json(facade: &mut FieldFacade, json: &str) -> bool {
    let fallback_ambient = facade.ambient_temperature();
    let parsed = SnapshotDocument::from_json(json).and_then(|doc| doc.into_snapshot(fallback_ambient));
    match parsed {
        Ok(snapshot) => restore_snapshot(facade, &snapshot),
        Err(err) => {
            warn!("{err}; keeping current thermal field");
            false
        }
    }
}

pub(super) fn restore_snapshot_bytes(facade: &mut FieldFacade, data: &[u8]) -> bool {
    match Snapshot::from_bytes(data) {
        Ok(snapshot) => restore_snapshot(facade, &snapshot),
        Err(err) => {
            warn!("{err}; keeping current thermal field");
            false
        }
    }
}
