//! Lightweight reactive behavior tree library.
//!
//! Trees are built once and re-evaluated from the root on every tick. No
//! per-node cursor is kept between ticks, so a shared tree can be ticked by
//! many agents concurrently as long as each brings its own context.
//!
//! - **Reactive**: every tick starts at the root
//! - **Three-valued**: [`Status::Running`] is propagated but never resumed
//! - **Named nodes**: every node carries a label for logging and debugging
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure, or Running
//! - Leaf nodes: [`Action`], [`Condition`]
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`AlwaysSucceed`], [`AlwaysFail`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysFail, AlwaysSucceed};
pub use leaf::{Action, Condition};
pub use status::Status;
