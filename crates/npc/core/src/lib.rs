//! Data model for the NPC decision engine.
//!
//! This crate contains everything the decision runtime reads and writes but
//! none of the decision logic itself:
//!
//! - [`Agent`]: mutable per-agent snapshot plus the [`Actuator`] surface
//! - [`Action`]: immutable prioritized output of a think cycle
//! - [`WorldView`]: read-only sensor surface, implemented by [`WorldSnapshot`]
//! - [`World`]: mutable registry that owns agents between think cycles
//! - [`DecisionHistory`]: bounded log of past decisions
//!
//! Time never comes from an ambient clock. Callers advance agents and the
//! world explicitly with a `dt` in seconds.

pub mod action;
pub mod agent;
pub mod error;
pub mod history;
pub mod math;
pub mod mode;
pub mod world;

pub use action::{Action, ActionKind, sort_by_priority};
pub use agent::{
    Actuator, Agent, AgentId, Capabilities, Cooldown, Cue, Effect, ShotOutcome, Team,
};
pub use error::WorldError;
pub use history::{DecisionHistory, DecisionRecord, HISTORY_CAPACITY};
pub use math::{Vec3, clamp_unit};
pub use mode::{Mode, Strategy};
pub use world::{AgentView, Observer, World, WorldSnapshot, WorldView};
