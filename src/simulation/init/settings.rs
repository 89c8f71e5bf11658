use serde::{Deserialize, Serialize};

use crate::backend::{BackendKind, BackendPreference, BackendState};
use crate::error::ThermalError;
use crate::temperature::DEFAULT_AMBIENT_TEMPERATURE;

use super::perf_stats::PerfStats;
use super::FieldFacade;

/// Minimum wall-clock gap between diffusion steps.
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 100;

/// Engine settings, usually loaded from the host's JSON config.
///
/// Every key is optional:
/// `{ "backend": "auto" | "optimized" | "portable", "updateIntervalMs": 100, "ambientTemperature": 20.0 }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    pub backend: BackendPreference,
    pub update_interval_ms: u64,
    pub ambient_temperature: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::Auto,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            ambient_temperature: DEFAULT_AMBIENT_TEMPERATURE,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ThermalError> {
        let config: EngineConfig = serde_json::from_str(json).map_err(|e| ThermalError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ThermalError> {
        if !self.ambient_temperature.is_finite() {
            return Err(ThermalError::InvalidConfig {
                reason: format!("ambientTemperature must be finite, got {}", self.ambient_temperature),
            });
        }
        Ok(())
    }
}

pub(super) fn set_update_interval_ms(facade: &mut FieldFacade, interval_ms: u64) {
    facade.config.update_interval_ms = interval_ms;
}

pub(super) fn update_interval_ms(facade: &FieldFacade) -> u64 {
    facade.config.update_interval_ms
}

/// Ambient of the live grid, or the configured default before the first
/// `initialize`.
pub(super) fn ambient_temperature(facade: &FieldFacade) -> f64 {
    match &facade.grid {
        Some(grid) => grid.ambient_temperature(),
        None => facade.config.ambient_temperature,
    }
}

pub(super) fn backend_state(facade: &FieldFacade) -> BackendState {
    facade.selector.state()
}

pub(super) fn backend_kind(facade: &FieldFacade) -> Option<BackendKind> {
    facade.selector.state().kind()
}

pub(super) fn perf_stats(facade: &FieldFacade) -> PerfStats {
    facade.perf_stats.clone()
}
