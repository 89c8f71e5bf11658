use super::perf_stats::PerfStats;

/// Wall-clock timer for one diffusion step.
#[derive(Clone, Copy)]
pub(crate) struct StepTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl StepTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            StepTimer { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            StepTimer { start: std::time::Instant::now() }
        }
    }

    fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// Record the elapsed time as a completed step.
    pub(crate) fn finish(self, stats: &mut PerfStats) {
        let ms = self.elapsed_ms();
        stats.steps_run = stats.steps_run.saturating_add(1);
        stats.last_step_ms = ms;
        stats.total_step_ms += ms;
    }
}
