//! Grid - thermal cell storage
//!
//! Two layouts implement the same `ThermalGrid` contract:
//! - `PortableGrid`: Vec<Cell>, one record per cell (reference layout)
//! - `FastGrid`:     temperature[] / next[] ping-pong buffers (SoA), row kernel
//!
//! Accessors are total over all integer coordinates: out-of-bounds reads
//! return ambient, out-of-bounds writes are ignored.

use crate::error::ThermalError;

mod indexing;
mod portable;
mod soa;

pub use indexing::GridDims;
pub use portable::PortableGrid;
pub use soa::FastGrid;

/// One simulation cell.
///
/// `next_temperature` is scratch for the diffuse pass and is never read
/// outside the kernels. `last_update` is diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub temperature: f64,
    pub next_temperature: f64,
    pub last_update: u64,
}

impl Cell {
    #[inline]
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            next_temperature: temperature,
            last_update: 0,
        }
    }
}

/// Behavior shared by every backend's grid.
pub trait ThermalGrid {
    fn dims(&self) -> GridDims;

    fn ambient_temperature(&self) -> f64;

    /// Current temperature, or ambient when `(x, y)` is outside the grid.
    fn get_temperature(&self, x: i64, y: i64) -> f64;

    /// Set both current and scratch temperature. No-op out of bounds.
    fn set_temperature(&mut self, x: i64, y: i64, value: f64);

    /// One diffuse + commit step, stamping `tick` on every cell.
    fn update(&mut self, tick: u64);

    /// Tick of the last commit that touched `(x, y)`.
    fn last_update(&self, x: i64, y: i64) -> Option<u64>;

    /// Append all temperatures in row-major order.
    fn write_temperatures(&self, out: &mut Vec<f64>);

    #[inline]
    fn width(&self) -> u32 {
        self.dims().width()
    }

    #[inline]
    fn height(&self) -> u32 {
        self.dims().height()
    }

    fn temperatures(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.dims().cell_count());
        self.write_temperatures(&mut out);
        out
    }
}

impl std::fmt::Debug for dyn ThermalGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThermalGrid")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("ambient_temperature", &self.ambient_temperature())
            .finish()
    }
}

/// Validate dimensions shared by both constructors.
pub(crate) fn checked_dims(width: u32, height: u32) -> Result<GridDims, ThermalError> {
    GridDims::new(width, height).ok_or(ThermalError::InvalidDimension { width, height })
}
