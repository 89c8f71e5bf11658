// ============================================================================
// ROW KERNEL FOR STRUCTURE-OF-ARRAYS TEMPERATURES
// ============================================================================
//
// Interior cells always have 4 neighbors, so the branchy neighbor gather
// collapses to fixed offsets. Edge cells fall back to the checked path.
//
// On wasm32 with simd128, interior cells are processed two at a time as
// f64x2 lanes. Lane arithmetic is plain IEEE add/sub/mul/div in the same
// order as the scalar path, so results stay bit-identical.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{relax, DIFFUSION_RATE};

/// Diffuse pass over a flat temperature buffer into `next`.
///
/// Each row of `next` is written independently from the read-only `temps`,
/// which is what lets the `parallel` feature split rows across threads.
pub fn diffuse_rows(temps: &[f64], next: &mut [f64], width: u32, height: u32) {
    let w = width as usize;
    debug_assert_eq!(temps.len(), w * height as usize);
    debug_assert_eq!(next.len(), temps.len());

    #[cfg(feature = "parallel")]
    {
        next.par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| diffuse_row(temps, row, width, height, y as u32));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in next.chunks_mut(w).enumerate() {
            diffuse_row(temps, row, width, height, y as u32);
        }
    }
}

fn diffuse_row(temps: &[f64], out: &mut [f64], width: u32, height: u32, y: u32) {
    let w = width as usize;
    let base = y as usize * w;
    let interior_row = y > 0 && y + 1 < height;

    if !interior_row || width < 3 {
        for x in 0..width {
            out[x as usize] = edge_cell(temps, width, height, x, y);
        }
        return;
    }

    out[0] = edge_cell(temps, width, height, 0, y);
    diffuse_interior(temps, out, base, w);
    out[w - 1] = edge_cell(temps, width, height, width - 1, y);
}

/// Checked gather used on the grid border.
#[inline]
fn edge_cell(temps: &[f64], width: u32, height: u32, x: u32, y: u32) -> f64 {
    let w = width as usize;
    let idx = y as usize * w + x as usize;
    let mut sum = 0.0;
    let mut count = 0u32;

    if y + 1 < height {
        sum += *fast!(temps, [idx + w]);
        count += 1;
    }
    if x + 1 < width {
        sum += *fast!(temps, [idx + 1]);
        count += 1;
    }
    if y > 0 {
        sum += *fast!(temps, [idx - w]);
        count += 1;
    }
    if x > 0 {
        sum += *fast!(temps, [idx - 1]);
        count += 1;
    }

    relax(*fast!(temps, [idx]), sum, count)
}

/// Interior cells `1..w-1` of one interior row.
#[cfg(not(all(target_arch = "wasm32", target_feature = "simd128")))]
#[inline]
fn diffuse_interior(temps: &[f64], out: &mut [f64], base: usize, w: usize) {
    for x in 1..w - 1 {
        let idx = base + x;
        let t = *fast!(temps, [idx]);
        let sum = 0.0
            + *fast!(temps, [idx + w])
            + *fast!(temps, [idx + 1])
            + *fast!(temps, [idx - w])
            + *fast!(temps, [idx - 1]);
        let avg = sum / 4.0;
        fast!(out, [x] = t + (avg - t) * DIFFUSION_RATE);
    }
}

#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
#[inline]
fn diffuse_interior(temps: &[f64], out: &mut [f64], base: usize, w: usize) {
    let end = w - 1;
    let mut x = 1;
    while x + 2 <= end {
        // SAFETY: x + 1 < w - 1 and the row is interior, so every offset read
        // below stays inside `temps`; `out` has w entries.
        unsafe { diffuse_pair_simd(temps.as_ptr(), out.as_mut_ptr(), base, w, x) };
        x += 2;
    }
    while x < end {
        let idx = base + x;
        let t = temps[idx];
        let sum = 0.0 + temps[idx + w] + temps[idx + 1] + temps[idx - w] + temps[idx - 1];
        let avg = sum / 4.0;
        out[x] = t + (avg - t) * DIFFUSION_RATE;
        x += 1;
    }
}

/// Two interior cells `x` and `x + 1` as f64x2 lanes.
///
/// # Safety
/// - `base + x + 1 + w` and `base + x - w` must be in bounds of `temps`
/// - `x + 1` must be in bounds of `out`
#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
#[inline]
unsafe fn diffuse_pair_simd(temps: *const f64, out: *mut f64, base: usize, w: usize, x: usize) {
    use std::arch::wasm32::*;

    let idx = base + x;
    let v_t = v128_load(temps.add(idx) as *const v128);
    let v_below = v128_load(temps.add(idx + w) as *const v128);
    let v_right = v128_load(temps.add(idx + 1) as *const v128);
    let v_above = v128_load(temps.add(idx - w) as *const v128);
    let v_left = v128_load(temps.add(idx - 1) as *const v128);

    let mut v_sum = f64x2_splat(0.0);
    v_sum = f64x2_add(v_sum, v_below);
    v_sum = f64x2_add(v_sum, v_right);
    v_sum = f64x2_add(v_sum, v_above);
    v_sum = f64x2_add(v_sum, v_left);

    let v_avg = f64x2_div(v_sum, f64x2_splat(4.0));
    let v_diff = f64x2_mul(f64x2_sub(v_avg, v_t), f64x2_splat(DIFFUSION_RATE));
    let v_next = f64x2_add(v_t, v_diff);

    v128_store(out.add(x) as *mut v128, v_next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::temperature::{diffuse_cells, initial_temperature};
    use crate::grid::Cell;

    fn field(width: u32, height: u32) -> Vec<f64> {
        let mut out = Vec::new();
        for y in 0..height {
            for x in 0..width {
                out.push(initial_temperature(x, y, width, height, 20.0) + (x * 7 + y * 3) as f64);
            }
        }
        out
    }

    #[test]
    fn row_kernel_matches_cell_kernel_bitwise() {
        for (w, h) in [(1, 1), (1, 5), (5, 1), (2, 2), (3, 3), (7, 4), (16, 9)] {
            let temps = field(w, h);
            let mut next = vec![0.0; temps.len()];
            diffuse_rows(&temps, &mut next, w, h);

            let mut cells: Vec<Cell> = temps.iter().map(|&t| Cell::new(t)).collect();
            diffuse_cells(&mut cells, w, h);

            for (i, cell) in cells.iter().enumerate() {
                assert_eq!(
                    cell.next_temperature.to_bits(),
                    next[i].to_bits(),
                    "{w}x{h} mismatch at {i}"
                );
            }
        }
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        let temps = vec![25.0; 12];
        let mut next = vec![0.0; 12];
        diffuse_rows(&temps, &mut next, 4, 3);
        assert!(next.iter().all(|&t| t == 25.0));
    }
}
