//! The ten layered events, in execution order:
//!
//! | # | Layer       | Event                   |
//! |---|-------------|-------------------------|
//! | 1 | Strategic   | [`GatherIntelligence`]    |
//! | 2 | Strategic   | [`DetermineStrategy`]     |
//! | 3 | Strategic   | [`ValidateStrategy`]      |
//! | 4 | Operational | [`CheckStateTransitions`] |
//! | 5 | Operational | [`ProcessFsm`]            |
//! | 6 | Operational | [`ValidateState`]         |
//! | 7 | Tactical    | [`ExecuteBehaviorTree`]   |
//! | 8 | Tactical    | [`ValidateBehavior`]      |
//! | 9 | Analysis    | [`EvaluatePerformance`]   |
//! | 10| Analysis    | [`LearnFromOutcome`]      |

mod analysis;
mod operational;
mod strategic;
mod tactical;

pub use analysis::{EvaluatePerformance, LearnFromOutcome};
pub use operational::{CheckStateTransitions, ProcessFsm, ValidateState};
pub use strategic::{
    ALLY_SCAN_RANGE, DetermineStrategy, ENEMY_SCAN_RANGE, GatherIntelligence, ValidateStrategy,
    decide_strategy, threat_level,
};
pub use tactical::{ExecuteBehaviorTree, ValidateBehavior, is_executable};

use crate::chain::{ChainMode, EventChain};
use crate::context::DecisionContext;
use crate::tactics::TacticalTree;

/// Chain with all ten events registered in layer order and no middleware.
pub fn layered_chain(mode: ChainMode, tree: TacticalTree) -> EventChain<DecisionContext> {
    EventChain::new(mode)
        .with_event(GatherIntelligence)
        .with_event(DetermineStrategy)
        .with_event(ValidateStrategy)
        .with_event(CheckStateTransitions)
        .with_event(ProcessFsm)
        .with_event(ValidateState)
        .with_event(ExecuteBehaviorTree::new(tree))
        .with_event(ValidateBehavior)
        .with_event(EvaluatePerformance)
        .with_event(LearnFromOutcome)
}
