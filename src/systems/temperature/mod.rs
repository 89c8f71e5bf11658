//! Temperature System - explicit heat-equation relaxation
//!
//! - 4-connected stencil, boundaries are no-flux (missing neighbors are
//!   dropped from the average, never replaced by ambient)
//! - Two-phase update: diffuse into scratch, then commit
//! - `scalar` is the portable per-cell kernel, `simd` the row kernel used by
//!   the optimized backend. Both sum neighbors in the same order
//!   (below, right, above, left) so their output is bit-identical.

mod scalar;
mod simd;

pub use scalar::{commit_cells, diffuse_cells};
pub use simd::diffuse_rows;

/// Fraction of the neighbor-average gap closed per step.
pub const DIFFUSION_RATE: f64 = 0.1;

/// Von Neumann stability bound for a 4-neighbor explicit stencil.
pub const MAX_STABLE_DIFFUSION_RATE: f64 = 0.25;

const _: () = assert!(DIFFUSION_RATE > 0.0 && DIFFUSION_RATE <= MAX_STABLE_DIFFUSION_RATE);

/// Default ambient temperature in °C.
pub const DEFAULT_AMBIENT_TEMPERATURE: f64 = 20.0;

/// Lower clamp for interactive edits.
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Upper clamp for interactive edits.
pub const MAX_EDIT_TEMPERATURE_C: f64 = 1000.0;

/// Radial starting field: warm center, cooler edges.
///
/// `dist` can exceed 1 in the corners of non-square grids; it is not clamped.
#[inline]
pub fn initial_temperature(x: u32, y: u32, width: u32, height: u32, ambient: f64) -> f64 {
    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;
    let max_dist = (cx * cx + cy * cy).sqrt();

    let dist = if max_dist > 0.0 {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        (dx * dx + dy * dy).sqrt() / max_dist
    } else {
        0.0
    };

    ambient * (1.0 - dist * 0.5)
}

/// Next temperature for one cell given its neighbor sum and count.
#[inline(always)]
pub(crate) fn relax(temp: f64, sum: f64, count: u32) -> f64 {
    if count == 0 {
        return temp;
    }
    let avg = sum / count as f64;
    let diff = (avg - temp) * DIFFUSION_RATE;
    temp + diff
}
