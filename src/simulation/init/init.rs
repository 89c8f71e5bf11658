use log::{error, info};

use crate::backend::BackendSelector;
use crate::error::ThermalError;
use crate::grid::checked_dims;

use super::perf_stats::PerfStats;
use super::settings::EngineConfig;
use super::FieldFacade;

pub(super) fn create_field_facade(config: EngineConfig, selector: BackendSelector) -> FieldFacade {
    FieldFacade {
        config,
        selector,
        grid: None,
        last_step_at: None,
        perf_stats: PerfStats::default(),
    }
}

/// (Re)build the grid on the selected backend.
///
/// Bad dimensions are rejected before anything is dropped. Otherwise the
/// old grid is released first, then the selector builds a new one,
/// falling back to the portable backend once if needed.
pub(super) fn initialize(
    facade: &mut FieldFacade,
    width: u32,
    height: u32,
    ambient_temperature: f64,
) -> Result<(), ThermalError> {
    let dims = checked_dims(width, height).map_err(ThermalError::initialization)?;
    if !ambient_temperature.is_finite() {
        return Err(ThermalError::initialization(ThermalError::InvalidConfig {
            reason: format!("ambient temperature must be finite, got {ambient_temperature}"),
        }));
    }

    drop(facade.grid.take());
    facade.last_step_at = None;

    match facade.selector.construct(width, height, ambient_temperature) {
        Ok(grid) => {
            info!(
                "thermal field {}x{} @ {} on {:?}",
                width,
                height,
                ambient_temperature,
                facade.selector.state()
            );
            facade.grid = Some(grid);
            facade.perf_stats.reset(dims.cell_count());
            Ok(())
        }
        Err(err) => {
            error!("thermal field initialization failed: {err}");
            Err(ThermalError::initialization(err))
        }
    }
}
