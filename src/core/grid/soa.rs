use crate::error::ThermalError;
use crate::systems::temperature::{diffuse_rows, initial_temperature};

use super::{checked_dims, GridDims, ThermalGrid};

/// Structure-of-arrays grid with ping-pong buffers.
///
/// `temperature` is the published buffer, `next` the scratch buffer the row
/// kernel writes. Commit swaps them. Every cell is committed with the same
/// tick, so one stamp covers the whole grid.
#[derive(Clone, Debug)]
pub struct FastGrid {
    dims: GridDims,
    ambient_temperature: f64,
    temperature: Vec<f64>,
    next: Vec<f64>,
    last_update: u64,
}

impl FastGrid {
    pub fn new(width: u32, height: u32, ambient_temperature: f64) -> Result<Self, ThermalError> {
        let dims = checked_dims(width, height)?;

        let mut temperature = Vec::with_capacity(dims.cell_count());
        for y in 0..height {
            for x in 0..width {
                temperature.push(initial_temperature(x, y, width, height, ambient_temperature));
            }
        }
        let next = temperature.clone();

        Ok(Self {
            dims,
            ambient_temperature,
            temperature,
            next,
            last_update: 0,
        })
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.temperature
    }
}

impl ThermalGrid for FastGrid {
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
            Some(idx) => self.temperature[idx],
            None => self.ambient_temperature,
        }
    }

    #[inline]
    fn set_temperature(&mut self, x: i64, y: i64, value: f64) {
        if let Some(idx) = self.dims.index(x, y) {
            self.temperature[idx] = value;
            self.next[idx] = value;
        }
    }

    fn update(&mut self, tick: u64) {
        diffuse_rows(&self.temperature, &mut self.next, self.dims.width(), self.dims.height());
        std::mem::swap(&mut self.temperature, &mut self.next);
        self.last_update = tick;
    }

    fn last_update(&self, x: i64, y: i64) -> Option<u64> {
        self.dims.in_bounds(x, y).then_some(self.last_update)
    }

    fn write_temperatures(&self, out: &mut Vec<f64>) {
        out.extend_from_slice(&self.temperature);
    }
}
