//! Zero-Cost Safety Macros
//!
//! Hot diffusion loops index temperature slices by precomputed row offsets.
//! In Debug those reads stay bounds-checked, in Release they compile to
//! unchecked access.
//!
//! Usage:
//! ```rust
//! use thermal_engine::fast;
//!
//! let row = vec![18.0_f64, 19.5, 21.0, 20.0];
//! let left = *fast!(row, [1]);
//! assert_eq!(left, 19.5);
//!
//! let mut next = vec![0.0_f64; 4];
//! fast!(next, [2] = left + 1.0);
//! assert_eq!(next[2], 20.5);
//! ```

/// Bounds-checked in Debug, `get_unchecked` in Release.
///
/// Callers must guarantee the index is in range; every call site in the
/// kernels derives indices from `y * width + x` with `x < width, y < height`.
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
