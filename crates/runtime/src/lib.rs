//! Layered NPC decision runtime.
//!
//! A think cycle runs ten events through an [`EventChain`]:
//!
//! - **Strategic**: gather intelligence, pick and validate a [`Strategy`](npc_core::Strategy)
//! - **Operational**: map it to a [`Mode`](npc_core::Mode) and drive the [`StateMachine`]
//! - **Tactical**: evaluate the [`TacticalTree`] and drop unexecutable actions
//! - **Analysis**: score the cycle and append a decision record
//!
//! [`DecisionEngine`] wires the chain with its middlewares and returns the
//! sorted actions; [`ActionDispatcher`] turns them into actuator calls.

pub mod chain;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod fsm;
pub mod middleware;
pub mod tactics;

pub use chain::{
    ChainError, ChainMode, ChainResult, Event, EventChain, EventContext, EventError,
    EventOutcome, EventRecord, Metrics, Middleware, Next, StageResult,
};
pub use config::EngineConfig;
pub use context::{DecisionContext, DecisionData, SimClock, ThinkTimers, keys};
pub use dispatch::{ActionDispatcher, DispatchReport};
pub use engine::{DecisionEngine, ThinkOutcome};
pub use error::{Result, ThinkError};
pub use fsm::{StateMachine, StateTimer};
pub use middleware::{DecisionLogger, PerformanceMonitor};
pub use tactics::{TacticalContext, TacticalTree};
