use wasm_bindgen::prelude::*;

/// Step counters for the thermal field. Cheap enough to keep always on.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(crate) steps_run: u32,
    pub(crate) steps_throttled: u32,
    pub(crate) last_step_ms: f64,
    pub(crate) total_step_ms: f64,
    pub(crate) cell_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self, cell_count: usize) {
        *self = PerfStats {
            cell_count: u32::try_from(cell_count).unwrap_or(u32::MAX),
            ..PerfStats::default()
        };
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn steps_run(&self) -> u32 { self.steps_run }
    #[wasm_bindgen(getter)]
    pub fn steps_throttled(&self) -> u32 { self.steps_throttled }
    #[wasm_bindgen(getter)]
    pub fn last_step_ms(&self) -> f64 { self.last_step_ms }
    #[wasm_bindgen(getter)]
    pub fn total_step_ms(&self) -> f64 { self.total_step_ms }
    #[wasm_bindgen(getter)]
    pub fn cell_count(&self) -> u32 { self.cell_count }

    /// Mean step time, 0 before the first step.
    #[wasm_bindgen(getter)]
    pub fn avg_step_ms(&self) -> f64 {
        if self.steps_run == 0 {
            0.0
        } else {
            self.total_step_ms / self.steps_run as f64
        }
    }
}
