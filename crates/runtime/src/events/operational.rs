//! Operational layer: map the strategy onto a mode and drive the FSM.

use std::time::Instant;

use npc_core::Mode;
use tracing::{debug, warn};

use crate::chain::{Event, EventError, EventOutcome};
use crate::context::DecisionContext;

/// Records the mode the strategy asks for, and the committed mode it leaves.
pub struct CheckStateTransitions;

impl Event<DecisionContext> for CheckStateTransitions {
    fn name(&self) -> &'static str {
        "CheckStateTransitions"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let started = Instant::now();

        let committed = ctx.agent.mode;
        let target = ctx.data.strategy.mode();
        if target != committed {
            ctx.data.previous_state = committed;
            debug!("{}: {} wants {}", ctx.agent.name, committed, target);
        }
        ctx.data.current_state = target;

        ctx.timers.operational = started.elapsed().as_secs_f32();
        Ok(EventOutcome::success())
    }
}

/// Transitions the FSM and runs the active handler once.
pub struct ProcessFsm;

impl Event<DecisionContext> for ProcessFsm {
    fn name(&self) -> &'static str {
        "ProcessFsm"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let started = Instant::now();
        let target = ctx.data.current_state;

        let confidence = {
            let (fsm, mut state_ctx) = ctx.split_fsm();
            let confidence = fsm.transition_to(target, &mut state_ctx);
            fsm.update(&mut state_ctx);
            confidence
        };

        ctx.data.transition_confidence = confidence;
        ctx.timers.operational += started.elapsed().as_secs_f32();
        Ok(EventOutcome::success())
    }
}

/// A stunned agent can only idle.
pub struct ValidateState;

impl Event<DecisionContext> for ValidateState {
    fn name(&self) -> &'static str {
        "ValidateState"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        if ctx.agent.stunned && ctx.data.current_state != Mode::Idle {
            warn!(
                "{} is stunned, forcing idle over {}",
                ctx.agent.name, ctx.data.current_state
            );
            ctx.data.current_state = Mode::Idle;
        }
        Ok(EventOutcome::success())
    }
}
