//! Field facade - the single entry point hosts drive
//!
//! Owns the backend selector, the live grid and the step throttle. The
//! facade only orchestrates; the heavy lifting lives in:
//! - init/     - construction and (re)initialization
//! - step/     - throttled diffusion steps
//! - commands/ - point edits, brush and bulk reads
//! - persist/  - snapshot capture and restore
//! - perf/     - step timing

use crate::backend::{BackendKind, BackendSelector, BackendState};
use crate::domain::snapshot::Snapshot;
use crate::error::ThermalError;
use crate::grid::{GridDims, ThermalGrid};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "persist/restore.rs"]
mod restore;
mod facade;

pub use facade::ThermalField;
pub use perf_stats::PerfStats;
pub use settings::{EngineConfig, DEFAULT_UPDATE_INTERVAL_MS};

/// A thermal field plus the machinery that picks its backend and paces it.
#[derive(Debug)]
pub struct FieldFacade {
    config: EngineConfig,
    selector: BackendSelector,
    grid: Option<Box<dyn ThermalGrid>>,
    last_step_at: Option<u64>,
    perf_stats: PerfStats,
}

impl Default for FieldFacade {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl FieldFacade {
    pub fn new(config: EngineConfig) -> Self {
        let selector = BackendSelector::new(config.backend);
        init::create_field_facade(config, selector)
    }

    /// Facade over a caller-built selector.
    pub fn with_selector(config: EngineConfig, selector: BackendSelector) -> Self {
        init::create_field_facade(config, selector)
    }

    pub fn from_config_json(json: &str) -> Result<Self, ThermalError> {
        EngineConfig::from_json(json).map(Self::new)
    }

    /// Build (or rebuild) the grid. The previous grid, if any, is released
    /// first; on error the facade is left uninitialized.
    pub fn initialize(&mut self, width: u32, height: u32, ambient_temperature: f64) -> Result<(), ThermalError> {
        init::initialize(self, width, height, ambient_temperature)
    }

    /// `initialize` with the configured ambient.
    pub fn initialize_default(&mut self, width: u32, height: u32) -> Result<(), ThermalError> {
        let ambient = self.config.ambient_temperature;
        init::initialize(self, width, height, ambient)
    }

    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    pub fn dims(&self) -> Option<GridDims> {
        self.grid.as_ref().map(|grid| grid.dims())
    }

    pub fn width(&self) -> u32 {
        self.dims().map_or(0, |dims| dims.width())
    }

    pub fn height(&self) -> u32 {
        self.dims().map_or(0, |dims| dims.height())
    }

    /// Step the field at host time `now_ms`. Returns whether a step ran.
    pub fn update(&mut self, now_ms: u64) -> bool {
        step::update(self, now_ms)
    }

    pub fn get_temperature(&self, x: i64, y: i64) -> f64 {
        commands::get_temperature(self, x, y)
    }

    pub fn set_temperature(&mut self, x: i64, y: i64, value: f64) {
        commands::set_temperature(self, x, y, value)
    }

    /// Paint a clamped temperature over a disc. Returns cells written.
    pub fn apply_brush(&mut self, cx: i64, cy: i64, radius: i64, value: f64) -> usize {
        commands::apply_brush(self, cx, cy, radius, value)
    }

    pub fn last_update(&self, x: i64, y: i64) -> Option<u64> {
        self.grid.as_ref().and_then(|grid| grid.last_update(x, y))
    }

    pub fn temperature_data(&self) -> Vec<f64> {
        commands::temperature_data(self)
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        restore::snapshot(self)
    }

    pub fn snapshot_json(&self) -> Option<Result<String, ThermalError>> {
        self.snapshot().map(|snapshot| snapshot.to_json())
    }

    pub fn snapshot_bytes(&self) -> Option<Result<Vec<u8>, ThermalError>> {
        self.snapshot().map(|snapshot| snapshot.to_bytes())
    }

    pub fn restore_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        restore::restore_snapshot(self, snapshot)
    }

    pub fn restore_snapshot_json(&mut self, json: &str) -> bool {
        restore::restore_snapshot_json(self, json)
    }

    pub fn restore_snapshot_bytes(&mut self, data: &[u8]) -> bool {
        restore::restore_snapshot_bytes(self, data)
    }

    pub fn ambient_temperature(&self) -> f64 {
        settings::ambient_temperature(self)
    }

    pub fn backend_state(&self) -> BackendState {
        settings::backend_state(self)
    }

    pub fn backend_kind(&self) -> Option<BackendKind> {
        settings::backend_kind(self)
    }

    pub fn set_update_interval_ms(&mut self, interval_ms: u64) {
        settings::set_update_interval_ms(self, interval_ms)
    }

    pub fn update_interval_ms(&self) -> u64 {
        settings::update_interval_ms(self)
    }

    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
