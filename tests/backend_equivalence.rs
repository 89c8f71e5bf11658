use proptest::prelude::*;

use thermal_engine::{FastGrid, PortableGrid, ThermalGrid};

#[derive(Clone, Debug)]
struct Edit {
    x: i64,
    y: i64,
    value: f64,
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    // Some coordinates land outside the grid on purpose.
    (-2i64..14, -2i64..14, -300.0f64..1200.0).prop_map(|(x, y, value)| Edit { x, y, value })
}

fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt()
}

fn same_bits(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

proptest! {
    #[test]
    fn fast_and_portable_grids_are_bit_identical(
        width in 1u32..13,
        height in 1u32..13,
        ambient in -50.0f64..150.0,
        edits in prop::collection::vec(arb_edit(), 0..12),
        steps in 0u64..25,
    ) {
        let mut fast = FastGrid::new(width, height, ambient).unwrap();
        let mut portable = PortableGrid::new(width, height, ambient).unwrap();
        prop_assert!(same_bits(&fast.temperatures(), &portable.temperatures()));

        for edit in &edits {
            fast.set_temperature(edit.x, edit.y, edit.value);
            portable.set_temperature(edit.x, edit.y, edit.value);
        }
        for tick in 1..=steps {
            fast.update(tick);
            portable.update(tick);
            prop_assert!(
                same_bits(&fast.temperatures(), &portable.temperatures()),
                "diverged at step {} on {}x{}", tick, width, height,
            );
        }
    }

    #[test]
    fn diffusion_smooths_without_overshoot(
        width in 1u32..10,
        height in 1u32..10,
        edits in prop::collection::vec(arb_edit(), 0..8),
        steps in 1u64..30,
    ) {
        let mut grid = FastGrid::new(width, height, 20.0).unwrap();
        for edit in &edits {
            grid.set_temperature(edit.x, edit.y, edit.value);
        }
        let start = grid.temperatures();
        let lo = start.iter().cloned().fold(f64::MAX, f64::min);
        let hi = start.iter().cloned().fold(f64::MIN, f64::max);

        let mut sigma = std_dev(&start);
        for tick in 1..=steps {
            grid.update(tick);
            let next_sigma = std_dev(&grid.temperatures());
            prop_assert!(next_sigma <= sigma * (1.0 + 1e-12) + 1e-12, "stddev rose at step {}", tick);
            sigma = next_sigma;
        }
        for t in grid.temperatures() {
            prop_assert!(t >= lo - 1e-9 && t <= hi + 1e-9, "{} outside [{}, {}]", t, lo, hi);
        }
        prop_assert_eq!(grid.ambient_temperature(), 20.0);
    }
}

#[test]
fn order_of_neighbor_summation_is_fixed() {
    // An asymmetric hot spot next to a border exercises every stencil shape.
    let mut fast = FastGrid::new(5, 4, 20.0).unwrap();
    let mut portable = PortableGrid::new(5, 4, 20.0).unwrap();
    for grid in [&mut fast as &mut dyn ThermalGrid, &mut portable] {
        grid.set_temperature(4, 0, 0.1);
        grid.set_temperature(3, 0, 1e6);
        grid.set_temperature(0, 3, -1e-7);
        grid.update(1);
    }
    assert!(same_bits(&fast.temperatures(), &portable.temperatures()));
}
