//! Thermal Engine - cellular heat diffusion in WASM
//!
//! Architecture:
//! - core/       - grid storage, errors, logging
//! - systems/    - diffusion kernels
//! - domain/     - snapshots exchanged with the host
//! - backend     - optimized/portable backend selection with fallback
//! - simulation/ - the throttled field facade and its JS wrapper

// Safety macros must be first for macro export
#[macro_use]
pub mod core;
pub mod systems;
pub mod domain;
pub mod backend;
pub mod simulation;

pub use crate::core::error;
pub use crate::core::grid;
pub use crate::core::logging;
pub use systems::temperature;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook plus console logging.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    logging::install_console_logger();
    log::info!("thermal engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use backend::{BackendKind, BackendPreference, BackendSelector, BackendState, ThermalBackend};
pub use domain::{Snapshot, SnapshotDocument, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
pub use error::ThermalError;
pub use grid::{FastGrid, GridDims, PortableGrid, ThermalGrid};
pub use simulation::{EngineConfig, FieldFacade, PerfStats, ThermalField, DEFAULT_UPDATE_INTERVAL_MS};
pub use temperature::{DEFAULT_AMBIENT_TEMPERATURE, DIFFUSION_RATE};
