/// Validated grid extent. Both sides are non-zero and `width * height`
/// fits in `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    width: u32,
    height: u32,
    size: usize,
}

impl GridDims {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let size = (width as usize).checked_mul(height as usize)?;
        Some(Self { width, height, size })
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    /// Number of cells, never zero.
    #[inline]
    pub fn cell_count(&self) -> usize { self.size }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    // === Index conversion ===
    /// Row-major index, `None` outside the grid.
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}
