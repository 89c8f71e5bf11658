use thermal_engine::{BackendState, FieldFacade};

#[test]
fn facade_smoke_run() {
    let mut field = FieldFacade::default();
    field.initialize(128, 64, 20.0).unwrap();
    assert_ne!(field.backend_state(), BackendState::Uninitialized);

    let outside = field.get_temperature(64, 43);
    assert!(field.apply_brush(64, 32, 10, 800.0) > 300);

    // 60 fps host clock: steps land on 0, 112, 224, ... 896
    let steps = (0..60u64).filter(|frame| field.update(frame * 16)).count();
    assert_eq!(steps, 9);

    let stats = field.perf_stats();
    assert_eq!(stats.steps_run(), 9);
    assert_eq!(stats.steps_throttled(), 51);
    assert!(stats.last_step_ms() >= 0.0);
    assert!(stats.avg_step_ms() >= 0.0);

    // Heat leaks past the brush edge and the core cools.
    assert!(field.get_temperature(64, 43) > outside);
    assert!(field.get_temperature(64, 32) < 800.0);
}
