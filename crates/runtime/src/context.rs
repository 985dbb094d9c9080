//! Per-tick decision context.
//!
//! A [`DecisionContext`] is created fresh for every think cycle. It owns the
//! agent and its state machine for the duration of the cycle so the shared
//! event chain and tactical tree can borrow them without lifetimes leaking
//! into their types. [`DecisionContext::into_parts`] hands both back.

use std::sync::Arc;

use npc_core::{Action, Agent, Mode, Strategy, WorldView};

use crate::chain::{EventContext, Metrics};
use crate::fsm::{StateContext, StateMachine};

/// Well-known metric names.
pub mod keys {
    pub const ENEMY_COUNT: &str = "enemy_count";
    pub const ALLY_COUNT: &str = "ally_count";
    pub const HEALTH_PERCENT: &str = "health_percent";
    pub const AMMO_PERCENT: &str = "ammo_percent";
    pub const THREAT_LEVEL: &str = "threat_level";
    pub const TOTAL_THINK_TIME: &str = "total_think_time";
    pub const AVERAGE_CONFIDENCE: &str = "average_confidence";
    pub const ACTION_COUNT: &str = "action_count";
}

/// Simulation time, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    pub now: f32,
    pub dt: f32,
}

impl SimClock {
    pub fn new(now: f32, dt: f32) -> Self {
        Self { now, dt }
    }
}

/// Wall-clock seconds spent per layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThinkTimers {
    pub strategic: f32,
    pub operational: f32,
    pub tactical: f32,
}

impl ThinkTimers {
    pub fn total(&self) -> f32 {
        self.strategic + self.operational + self.tactical
    }
}

/// Typed outputs of the layered events.
#[derive(Clone, Debug, Default)]
pub struct DecisionData {
    pub strategy: Strategy,
    pub strategy_confidence: f32,
    pub previous_state: Mode,
    pub current_state: Mode,
    pub transition_confidence: f32,
    /// In emission order until the engine sorts them.
    pub actions: Vec<Action>,
    pub behavior_confidence: f32,
    pub metrics: Metrics,
}

pub struct DecisionContext {
    pub agent: Agent,
    pub fsm: StateMachine,
    pub world: Arc<dyn WorldView>,
    pub data: DecisionData,
    pub timers: ThinkTimers,
    pub clock: SimClock,
    errors: Vec<String>,
}

impl DecisionContext {
    pub fn new(agent: Agent, fsm: StateMachine, world: Arc<dyn WorldView>, clock: SimClock) -> Self {
        Self {
            agent,
            fsm,
            world,
            data: DecisionData::default(),
            timers: ThinkTimers::default(),
            clock,
            errors: Vec::new(),
        }
    }

    /// Borrows the state machine alongside the context its handlers run in.
    pub fn split_fsm(&mut self) -> (&mut StateMachine, StateContext<'_>) {
        (
            &mut self.fsm,
            StateContext {
                agent: &mut self.agent,
                world: self.world.as_ref(),
                clock: self.clock,
            },
        )
    }

    /// Gives the agent and state machine back to the caller.
    pub fn into_parts(self) -> (Agent, StateMachine, DecisionData, Vec<String>) {
        (self.agent, self.fsm, self.data, self.errors)
    }
}

impl EventContext for DecisionContext {
    fn metrics(&self) -> &Metrics {
        &self.data.metrics
    }

    fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.data.metrics
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }

    fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }
}
