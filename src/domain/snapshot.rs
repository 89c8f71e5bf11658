//! Snapshot - the persisted form of a thermal grid
//!
//! Only published temperatures are captured; scratch values and commit
//! stamps are transient and never persisted.
//!
//! JSON shape (field names and order are the compatibility contract):
//! `{ "width": u32, "height": u32, "ambientTemperature": f64, "cells": [[f64; width]; height] }`

use serde::{Deserialize, Serialize};

use crate::error::ThermalError;
use crate::grid::{GridDims, ThermalGrid};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub ambient_temperature: f64,
    pub cells: Vec<Vec<f64>>,
}

impl Snapshot {
    /// Structural check: non-zero extent and a finite ambient. Short or
    /// ragged rows are allowed and are applied partially.
    pub fn dims(&self) -> Result<GridDims, ThermalError> {
        if !self.ambient_temperature.is_finite() {
            return Err(ThermalError::malformed("ambient temperature is not finite"));
        }
        GridDims::new(self.width, self.height).ok_or_else(|| {
            ThermalError::malformed(format!("zero extent {}x{}", self.width, self.height))
        })
    }

    /// JSON has no NaN or infinity, so a field holding one can only be
    /// saved with `to_bytes`.
    pub fn to_json(&self) -> Result<String, ThermalError> {
        self.dims()?;
        if let Some((y, x)) = self.cells.iter().enumerate().find_map(|(y, row)| {
            row.iter().position(|t| !t.is_finite()).map(|x| (y, x))
        }) {
            return Err(ThermalError::malformed(format!(
                "cell ({x}, {y}) is not finite and cannot be written as JSON"
            )));
        }
        serde_json::to_string(self).map_err(|e| ThermalError::malformed(e.to_string()))
    }

    /// Strict parse: every field must be present.
    pub fn from_json(json: &str) -> Result<Self, ThermalError> {
        serde_json::from_str(json).map_err(|e| ThermalError::malformed(e.to_string()))
    }

    /// Temperature stored for `(x, y)`, if the snapshot carries it.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Option<f64> {
        self.cells.get(y)?.get(x).copied()
    }
}

/// Lenient decoding of a stored snapshot.
///
/// Save files written by older hosts may omit `ambientTemperature`; a missing
/// ambient means "keep whatever the field is using now". Missing `width`,
/// `height` or `cells` make the document unusable.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotDocument {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub ambient_temperature: Option<f64>,
    pub cells: Option<Vec<Vec<f64>>>,
}

impl SnapshotDocument {
    pub fn from_json(json: &str) -> Result<Self, ThermalError> {
        serde_json::from_str(json).map_err(|e| ThermalError::malformed(e.to_string()))
    }

    pub fn into_snapshot(self, fallback_ambient: f64) -> Result<Snapshot, ThermalError> {
        let width = self.width.ok_or_else(|| ThermalError::malformed("missing width"))?;
        let height = self.height.ok_or_else(|| ThermalError::malformed("missing height"))?;
        let cells = self.cells.ok_or_else(|| ThermalError::malformed("missing cells"))?;

        let snapshot = Snapshot {
            width,
            height,
            ambient_temperature: self.ambient_temperature.unwrap_or(fallback_ambient),
            cells,
        };
        snapshot.dims()?;
        Ok(snapshot)
    }
}

/// Copy a grid's published temperatures into a snapshot, row-major.
pub fn capture<G: ThermalGrid + ?Sized>(grid: &G) -> Snapshot {
    let dims = grid.dims();
    let flat = grid.temperatures();
    let cells = flat
        .chunks(dims.width() as usize)
        .map(|row| row.to_vec())
        .collect();

    Snapshot {
        width: dims.width(),
        height: dims.height(),
        ambient_temperature: grid.ambient_temperature(),
        cells,
    }
}

/// Write snapshot temperatures into a grid of the same size.
///
/// A size mismatch is an error, never a partial copy; the caller resizes
/// first. Indices missing from a truncated snapshot are skipped.
pub fn apply<G: ThermalGrid + ?Sized>(grid: &mut G, snapshot: &Snapshot) -> Result<(), ThermalError> {
    let dims = snapshot.dims()?;
    let grid_dims = grid.dims();
    if dims.width() != grid_dims.width() || dims.height() != grid_dims.height() {
        return Err(ThermalError::malformed(format!(
            "snapshot is {}x{} but grid is {}x{}",
            dims.width(),
            dims.height(),
            grid_dims.width(),
            grid_dims.height()
        )));
    }

    for y in 0..dims.height() as usize {
        for x in 0..dims.width() as usize {
            if let Some(t) = snapshot.cell(x, y) {
                grid.set_temperature(x as i64, y as i64, t);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{FastGrid, PortableGrid};

    #[test]
    fn json_field_order_is_stable() {
        let snapshot = Snapshot {
            width: 2,
            height: 1,
            ambient_temperature: 20.0,
            cells: vec![vec![1.5, 2.5]],
        };
        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"width":2,"height":1,"ambientTemperature":20.0,"cells":[[1.5,2.5]]}"#
        );
    }

    #[test]
    fn non_finite_cells_are_refused_as_json() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let snapshot = Snapshot {
                width: 2,
                height: 1,
                ambient_temperature: 20.0,
                cells: vec![vec![1.0, bad]],
            };
            assert!(matches!(
                snapshot.to_json(),
                Err(ThermalError::MalformedSnapshot { .. })
            ));
            // The binary frame carries raw bits.
            let decoded = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
            assert_eq!(decoded.cells[0][1].to_bits(), bad.to_bits());
        }
    }

    #[test]
    fn capture_copies_rows() {
        let mut grid = PortableGrid::new(3, 2, 20.0).unwrap();
        grid.set_temperature(2, 1, 99.0);
        let snapshot = capture(&grid);
        assert_eq!(snapshot.width, 3);
        assert_eq!(snapshot.height, 2);
        assert_eq!(snapshot.cells.len(), 2);
        assert!(snapshot.cells.iter().all(|row| row.len() == 3));
        assert_eq!(snapshot.cells[1][2], 99.0);
        assert_eq!(snapshot.cells[1][1], grid.get_temperature(1, 1));
    }

    #[test]
    fn apply_rejects_size_mismatch_without_touching_grid() {
        let mut grid = FastGrid::new(3, 3, 20.0).unwrap();
        let before = grid.temperatures();
        let snapshot = Snapshot {
            width: 2,
            height: 2,
            ambient_temperature: 20.0,
            cells: vec![vec![0.0; 2]; 2],
        };
        assert!(matches!(
            apply(&mut grid, &snapshot),
            Err(ThermalError::MalformedSnapshot { .. })
        ));
        assert_eq!(grid.temperatures(), before);
    }

    #[test]
    fn apply_skips_missing_rows_and_columns() {
        let mut grid = PortableGrid::new(3, 3, 20.0).unwrap();
        let before = grid.temperatures();
        let snapshot = Snapshot {
            width: 3,
            height: 3,
            ambient_temperature: 20.0,
            cells: vec![vec![1.0, 2.0, 3.0], vec![4.0]],
        };
        apply(&mut grid, &snapshot).unwrap();

        assert_eq!(grid.get_temperature(0, 0), 1.0);
        assert_eq!(grid.get_temperature(2, 0), 3.0);
        assert_eq!(grid.get_temperature(0, 1), 4.0);
        assert_eq!(grid.get_temperature(1, 1), before[4]);
        assert_eq!(grid.get_temperature(2, 2), before[8]);
    }

    #[test]
    fn document_requires_structure() {
        let doc = SnapshotDocument::from_json(r#"{"width":2,"cells":[]}"#).unwrap();
        assert!(matches!(
            doc.into_snapshot(20.0),
            Err(ThermalError::MalformedSnapshot { .. })
        ));

        let doc = SnapshotDocument::from_json(r#"{"width":0,"height":2,"cells":[]}"#).unwrap();
        assert!(doc.into_snapshot(20.0).is_err());
    }

    #[test]
    fn document_without_ambient_uses_fallback() {
        let doc = SnapshotDocument::from_json(r#"{"width":1,"height":1,"cells":[[5.0]]}"#).unwrap();
        let snapshot = doc.into_snapshot(12.0).unwrap();
        assert_eq!(snapshot.ambient_temperature, 12.0);
        assert_eq!(snapshot.cell(0, 0), Some(5.0));
    }

    #[test]
    fn strict_parse_rejects_missing_field() {
        assert!(Snapshot::from_json(r#"{"width":1,"height":1,"cells":[[5.0]]}"#).is_err());
        assert!(Snapshot::from_json("not json").is_err());
    }
}
