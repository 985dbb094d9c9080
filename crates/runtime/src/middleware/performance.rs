use std::time::{Duration, Instant};

use tracing::warn;

use crate::chain::{EventContext, Middleware, Next, StageResult};

/// One frame at 60 Hz.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Warns when a chain run takes longer than the frame budget. Never aborts.
#[derive(Clone, Copy, Debug)]
pub struct PerformanceMonitor {
    budget: Duration,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_BUDGET)
    }
}

impl PerformanceMonitor {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn is_over_budget(&self, elapsed: Duration) -> bool {
        elapsed > self.budget
    }
}

impl<C: EventContext> Middleware<C> for PerformanceMonitor {
    fn name(&self) -> &'static str {
        "PerformanceMonitor"
    }

    fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> StageResult {
        let started = Instant::now();
        let result = next.run(ctx);
        let elapsed = started.elapsed();

        if self.is_over_budget(elapsed) {
            warn!(
                "Chain took {:.2}ms (exceeded frame budget of {}ms)",
                elapsed.as_secs_f64() * 1000.0,
                self.budget.as_millis()
            );
        }
        result
    }
}
