use tracing::{error, info};

use crate::chain::{Middleware, Next, StageResult};
use crate::context::DecisionContext;

/// Logs the start and outcome of every think cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecisionLogger;

impl Middleware<DecisionContext> for DecisionLogger {
    fn name(&self) -> &'static str {
        "DecisionLogger"
    }

    fn handle(&self, ctx: &mut DecisionContext, next: Next<'_, DecisionContext>) -> StageResult {
        info!("Starting think cycle for {}", ctx.agent.name);

        let result = next.run(ctx);
        match &result {
            Ok(outcome) if outcome.success => info!(
                "{} completed with {} actions | strategy: {} | mode: {} | precision: {:.2}",
                ctx.agent.name,
                ctx.data.actions.len(),
                ctx.data.strategy,
                ctx.data.current_state,
                outcome.precision
            ),
            Ok(outcome) => error!(
                "{} think cycle failed: {}",
                ctx.agent.name,
                outcome.failure_reason.as_deref().unwrap_or("unknown")
            ),
            Err(err) => error!("{} think cycle failed: {}", ctx.agent.name, err),
        }
        result
    }
}
