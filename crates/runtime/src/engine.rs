//! One-call think cycle over the layered chain.

use std::mem;
use std::sync::Arc;

use npc_core::{Action, Agent, Mode, Strategy, WorldView, sort_by_priority};
use tracing::debug;

use crate::chain::{ChainResult, EventChain, Metrics};
use crate::config::EngineConfig;
use crate::context::{DecisionContext, SimClock};
use crate::error::{Result, ThinkError};
use crate::events::layered_chain;
use crate::fsm::StateMachine;
use crate::middleware::{DecisionLogger, PerformanceMonitor};
use crate::tactics::TacticalTree;

/// Everything a caller needs from one think cycle.
#[derive(Clone, Debug)]
pub struct ThinkOutcome {
    pub strategy: Strategy,
    pub strategy_confidence: f32,
    pub mode: Mode,
    pub transition_confidence: f32,
    pub behavior_confidence: f32,
    /// Sorted by descending priority; ties keep emission order.
    pub actions: Vec<Action>,
    pub chain: ChainResult,
    pub metrics: Metrics,
    pub errors: Vec<String>,
}

impl ThinkOutcome {
    pub fn succeeded(&self) -> bool {
        self.chain.success
    }
}

/// Shared, immutable decision pipeline.
///
/// One engine serves every agent; per-agent state lives in the [`Agent`] and
/// its [`StateMachine`], both lent to [`think`](Self::think).
pub struct DecisionEngine {
    chain: EventChain<DecisionContext>,
    config: EngineConfig,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_tree(config, TacticalTree::standard())
    }

    pub fn with_tree(config: EngineConfig, tree: TacticalTree) -> Self {
        let mut chain = layered_chain(config.chain_mode, tree);
        if config.decision_logging {
            chain = chain.with_middleware(DecisionLogger);
        }
        let chain = chain.with_middleware(PerformanceMonitor::new(config.frame_budget));

        Self { chain, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn chain(&self) -> &EventChain<DecisionContext> {
        &self.chain
    }

    /// Runs one think cycle for `agent`.
    ///
    /// The agent and state machine are always handed back, even when the
    /// chain aborts. The agent's committed mode only changes when the chain
    /// reports success.
    pub fn think(
        &self,
        agent: &mut Agent,
        fsm: &mut StateMachine,
        world: Arc<dyn WorldView>,
        clock: SimClock,
    ) -> Result<ThinkOutcome> {
        if !agent.is_alive() {
            return Err(ThinkError::AgentDown(agent.id));
        }

        let mut ctx = DecisionContext::new(mem::take(agent), mem::take(fsm), world, clock);
        let result = self.chain.execute(&mut ctx);
        let (thought, machine, mut data, errors) = ctx.into_parts();
        *agent = thought;
        *fsm = machine;

        let chain = result?;
        if chain.success {
            agent.mode = data.current_state;
        }
        sort_by_priority(&mut data.actions);

        debug!(
            "{} decided {} -> {} with {} actions",
            agent.name,
            data.strategy,
            data.current_state,
            data.actions.len()
        );

        Ok(ThinkOutcome {
            strategy: data.strategy,
            strategy_confidence: data.strategy_confidence,
            mode: data.current_state,
            transition_confidence: data.transition_confidence,
            behavior_confidence: data.behavior_confidence,
            actions: data.actions,
            chain,
            metrics: data.metrics,
            errors,
        })
    }
}
