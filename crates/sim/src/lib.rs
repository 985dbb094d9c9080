//! Headless simulator for the NPC decision runtime.
//!
//! Builds a [`Scenario`] world, runs every living agent through one shared
//! [`DecisionEngine`](ai_runtime::DecisionEngine) per frame and summarises the
//! result in a [`SimReport`].

pub mod config;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::SimConfig;
pub use report::{AgentSummary, Outcome, SimReport, Survivors};
pub use runner::{FrameStats, SimError, Simulation};
pub use scenario::Scenario;
