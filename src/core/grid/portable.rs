use crate::error::ThermalError;
use crate::systems::temperature::{commit_cells, diffuse_cells, initial_temperature};

use super::{checked_dims, Cell, GridDims, ThermalGrid};

/// Array-of-cells grid: every cell carries its own scratch value and
/// commit stamp.
#[derive(Clone, Debug)]
pub struct PortableGrid {
    dims: GridDims,
    ambient_temperature: f64,
    cells: Vec<Cell>,
}

impl PortableGrid {
    pub fn new(width: u32, height: u32, ambient_temperature: f64) -> Result<Self, ThermalError> {
        let dims = checked_dims(width, height)?;

        let mut cells = Vec::with_capacity(dims.cell_count());
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(initial_temperature(x, y, width, height, ambient_temperature)));
            }
        }

        Ok(Self {
            dims,
            ambient_temperature,
            cells,
        })
    }

    #[cfg(test)]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl ThermalGrid for PortableGrid {
    #[inline]
    fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }

    #[inline]
    fn get_temperature(&self, x: i64, y: i64) -> f64 {
        match self.dims.index(x, y) {
            Some(idx) => self.cells[idx].temperature,
            None => self.ambient_temperature,
        }
    }

    #[inline]
    fn set_temperature(&mut self, x: i64, y: i64, value: f64) {
        if let Some(idx) = self.dims.index(x, y) {
            let cell = &mut self.cells[idx];
            cell.temperature = value;
            cell.next_temperature = value;
        }
    }

    fn update(&mut self, tick: u64) {
        diffuse_cells(&mut self.cells, self.dims.width(), self.dims.height());
        commit_cells(&mut self.cells, tick);
    }

    fn last_update(&self, x: i64, y: i64) -> Option<u64> {
        self.dims.index(x, y).map(|idx| self.cells[idx].last_update)
    }

    fn write_temperatures(&self, out: &mut Vec<f64>) {
        out.extend(self.cells.iter().map(|c| c.temperature));
    }
}
