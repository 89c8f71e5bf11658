use crate::grid::Cell;

use super::relax;

/// Diffuse pass over array-of-cells storage.
///
/// Reads only `temperature`, writes only `next_temperature`, so visiting
/// order cannot bias the result.
pub fn diffuse_cells(cells: &mut [Cell], width: u32, height: u32) {
    debug_assert_eq!(cells.len(), width as usize * height as usize);

    let w = width as usize;
    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * w + x as usize;
            let mut sum = 0.0;
            let mut count = 0u32;

            // below, right, above, left
            if y + 1 < height {
                sum += cells[idx + w].temperature;
                count += 1;
            }
            if x + 1 < width {
                sum += cells[idx + 1].temperature;
                count += 1;
            }
            if y > 0 {
                sum += cells[idx - w].temperature;
                count += 1;
            }
            if x > 0 {
                sum += cells[idx - 1].temperature;
                count += 1;
            }

            if count > 0 {
                cells[idx].next_temperature = relax(cells[idx].temperature, sum, count);
            }
        }
    }
}

/// Commit pass: publish scratch values and stamp the tick.
pub fn commit_cells(cells: &mut [Cell], tick: u64) {
    for cell in cells.iter_mut() {
        cell.temperature = cell.next_temperature;
        cell.last_update = tick;
    }
}
