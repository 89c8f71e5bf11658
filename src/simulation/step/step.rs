use log::debug;

use super::perf_timer::StepTimer;
use super::FieldFacade;

/// Throttle gate: is a step due at `now`?
///
/// The gap is measured in either direction, so a small backwards jitter is
/// throttled like any other close call. A clock that restarted far behind
/// the last step runs the step and re-arms the throttle from `now`.
#[inline]
pub(super) fn step_due(last_step_at: Option<u64>, now: u64, interval_ms: u64) -> bool {
    match last_step_at {
        None => true,
        Some(last) => now.abs_diff(last) >= interval_ms,
    }
}

/// Run one diffusion step if the throttle allows it.
pub(super) fn update(facade: &mut FieldFacade, now: u64) -> bool {
    let Some(grid) = facade.grid.as_mut() else {
        return false;
    };

    if !step_due(facade.last_step_at, now, facade.config.update_interval_ms) {
        facade.perf_stats.steps_throttled = facade.perf_stats.steps_throttled.saturating_add(1);
        return false;
    }

    if let Some(last) = facade.last_step_at {
        if now < last {
            debug!("timestamp went backwards ({last} -> {now}); re-arming throttle");
        }
    }

    let timer = StepTimer::start();
    grid.update(now);
    timer.finish(&mut facade.perf_stats);

    facade.last_step_at = Some(now);
    true
}
