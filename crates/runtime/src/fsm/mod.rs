//! Operational-layer finite state machine.
//!
//! The six behavioral modes are a closed set, so the machine keeps one
//! pre-built handler per [`Mode`] in a fixed table and only swaps which one is
//! active. Handlers keep their own per-stint data (timers, targets, route
//! index) and reset it in [`State::enter`].

mod states;

pub use states::{
    CollaborateState, CombatState, FleeState, IdleState, InvestigateState, PatrolState,
};

use npc_core::{Agent, Mode, WorldView};
use tracing::debug;

use crate::context::SimClock;

/// Confidence reported when the requested mode is already active.
pub const STAY_CONFIDENCE: f32 = 1.0;

/// Confidence reported after switching modes.
pub const SWITCH_CONFIDENCE: f32 = 0.95;

/// What a state handler may touch while it runs.
pub struct StateContext<'a> {
    pub agent: &'a mut Agent,
    pub world: &'a dyn WorldView,
    pub clock: SimClock,
}

/// Seconds spent in the current stint of a state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateTimer {
    elapsed: f32,
}

impl StateTimer {
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

pub trait State {
    fn enter(&mut self, ctx: &mut StateContext<'_>);

    fn update(&mut self, ctx: &mut StateContext<'_>);

    fn exit(&mut self, _ctx: &mut StateContext<'_>) {}
}

/// Closed set of state handlers.
#[derive(Clone, Debug)]
pub enum StateHandler {
    Idle(IdleState),
    Patrol(PatrolState),
    Investigate(InvestigateState),
    Combat(CombatState),
    Flee(FleeState),
    Collaborate(CollaborateState),
}

impl StateHandler {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Idle => Self::Idle(IdleState::default()),
            Mode::Patrol => Self::Patrol(PatrolState::default()),
            Mode::Investigate => Self::Investigate(InvestigateState::default()),
            Mode::Combat => Self::Combat(CombatState::default()),
            Mode::Flee => Self::Flee(FleeState::default()),
            Mode::Collaborate => Self::Collaborate(CollaborateState::default()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Idle(_) => Mode::Idle,
            Self::Patrol(_) => Mode::Patrol,
            Self::Investigate(_) => Mode::Investigate,
            Self::Combat(_) => Mode::Combat,
            Self::Flee(_) => Mode::Flee,
            Self::Collaborate(_) => Mode::Collaborate,
        }
    }

    fn state_mut(&mut self) -> &mut dyn State {
        match self {
            Self::Idle(s) => s,
            Self::Patrol(s) => s,
            Self::Investigate(s) => s,
            Self::Combat(s) => s,
            Self::Flee(s) => s,
            Self::Collaborate(s) => s,
        }
    }
}

/// Per-agent state machine. Exactly one handler is active after the first
/// transition.
#[derive(Clone, Debug)]
pub struct StateMachine {
    handlers: [StateHandler; 6],
    active: Option<Mode>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            handlers: Mode::ALL.map(StateHandler::for_mode),
            active: None,
        }
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Mode> {
        self.active
    }

    pub fn handler(&self, mode: Mode) -> &StateHandler {
        &self.handlers[mode.index()]
    }

    /// Switches to `mode` and returns the transition confidence.
    ///
    /// Re-entering the active mode is a no-op.
    pub fn transition_to(&mut self, mode: Mode, ctx: &mut StateContext<'_>) -> f32 {
        if self.active == Some(mode) {
            return STAY_CONFIDENCE;
        }

        if let Some(current) = self.active {
            self.handlers[current.index()].state_mut().exit(ctx);
            debug!("{}: {} -> {}", ctx.agent.name, current, mode);
        } else {
            debug!("{}: entering {}", ctx.agent.name, mode);
        }

        self.active = Some(mode);
        self.handlers[mode.index()].state_mut().enter(ctx);
        SWITCH_CONFIDENCE
    }

    /// Runs the active handler once. Does nothing before the first transition.
    pub fn update(&mut self, ctx: &mut StateContext<'_>) {
        if let Some(mode) = self.active {
            self.handlers[mode.index()].state_mut().update(ctx);
        }
    }
}
