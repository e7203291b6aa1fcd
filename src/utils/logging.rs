use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Scoped timer for the pipeline stages: emits trace spans and, when given
/// an output slot, accumulates the elapsed time into it on drop.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Instant,
    output: Option<&'a mut Duration>,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("⏱️ start {label}");
        }
        Self {
            label,
            start: Instant::now(),
            output: None,
        }
    }

    /// Also accumulate the elapsed time into `output` on drop.
    pub fn with_output(label: &'a str, output: &'a mut Duration) -> Self {
        let mut timer = Self::new(label);
        timer.output = Some(output);
        timer
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if let Some(output) = self.output.as_mut() {
            **output += elapsed;
        }
        if log_enabled!(Level::Trace) {
            log::trace!("⏱️ end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}

/// Registers a warning when the culling frame budget is exceeded.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) {
    if duration.as_secs_f32() * 1000.0 > budget_ms {
        warn!(
            "Culling frame exceeded budget: {:.2} ms > {:.2} ms",
            duration.as_secs_f32() * 1000.0,
            budget_ms
        );
    }
}
