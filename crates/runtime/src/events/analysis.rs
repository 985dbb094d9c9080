//! Analysis layer: score the cycle and remember it.

use npc_core::DecisionRecord;

use crate::chain::{Event, EventContext, EventError, EventOutcome};
use crate::context::{DecisionContext, keys};

pub struct EvaluatePerformance;

impl Event<DecisionContext> for EvaluatePerformance {
    fn name(&self) -> &'static str {
        "EvaluatePerformance"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let data = &ctx.data;
        let average = (data.strategy_confidence
            + data.transition_confidence
            + data.behavior_confidence)
            / 3.0;
        let total = ctx.timers.total();
        let count = data.actions.len() as f32;

        let metrics = ctx.metrics_mut();
        metrics.set(keys::TOTAL_THINK_TIME, total);
        metrics.set(keys::AVERAGE_CONFIDENCE, average);
        metrics.set(keys::ACTION_COUNT, count);
        Ok(EventOutcome::success())
    }
}

/// Appends a [`DecisionRecord`] to the agent's history.
pub struct LearnFromOutcome;

impl Event<DecisionContext> for LearnFromOutcome {
    fn name(&self) -> &'static str {
        "LearnFromOutcome"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let metrics = ctx.metrics();
        let threat_level = metrics.require(keys::THREAT_LEVEL)?;
        let health_percent = metrics.require(keys::HEALTH_PERCENT)?;
        let confidence = metrics.require(keys::AVERAGE_CONFIDENCE)?;

        let record = DecisionRecord {
            timestamp: ctx.clock.now,
            strategy: ctx.data.strategy,
            state: ctx.data.current_state,
            threat_level,
            health_percent,
            confidence,
        };
        ctx.agent.history.push(record);
        Ok(EventOutcome::success())
    }
}
