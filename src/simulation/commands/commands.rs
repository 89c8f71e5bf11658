use crate::temperature::{ABSOLUTE_ZERO_C, MAX_EDIT_TEMPERATURE_C};

use super::FieldFacade;

pub(super) fn get_temperature(facade: &FieldFacade, x: i64, y: i64) -> f64 {
    match &facade.grid {
        Some(grid) => grid.get_temperature(x, y),
        None => facade.config.ambient_temperature,
    }
}

pub(super) fn set_temperature(facade: &mut FieldFacade, x: i64, y: i64, value: f64) {
    if let Some(grid) = facade.grid.as_mut() {
        grid.set_temperature(x, y, value);
    }
}

/// Paint a disc of `radius` cells around `(cx, cy)` with a clamped value.
/// Returns how many in-bounds cells were written.
pub(super) fn apply_brush(facade: &mut FieldFacade, cx: i64, cy: i64, radius: i64, value: f64) -> usize {
    if radius < 0 || value.is_nan() {
        return 0;
    }
    let Some(grid) = facade.grid.as_mut() else {
        return 0;
    };

    let value = value.clamp(ABSOLUTE_ZERO_C, MAX_EDIT_TEMPERATURE_C);
    let dims = grid.dims();
    let r2 = radius.saturating_mul(radius);
    let mut touched = 0;

    // Clip the scan box to the grid so huge radii stay cheap.
    let x0 = cx.saturating_sub(radius).max(0);
    let x1 = cx.saturating_add(radius).min(dims.width() as i64 - 1);
    let y0 = cy.saturating_sub(radius).max(0);
    let y1 = cy.saturating_add(radius).min(dims.height() as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x.saturating_sub(cx);
            let dy = y.saturating_sub(cy);
            if dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy)) <= r2 {
                grid.set_temperature(x, y, value);
                touched += 1;
            }
        }
    }
    touched
}

/// `[width, height, t0, t1, ...]`, row-major. Empty before `initialize`.
pub(super) fn temperature_data(facade: &FieldFacade) -> Vec<f64> {
    let Some(grid) = &facade.grid else {
        return Vec::new();
    };
    let dims = grid.dims();
    let mut out = Vec::with_capacity(2 + dims.cell_count());
    out.push(dims.width() as f64);
    out.push(dims.height() as f64);
    grid.write_temperatures(&mut out);
    out
}
