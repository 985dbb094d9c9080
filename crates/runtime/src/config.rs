//! Engine configuration.

use std::time::Duration;

use crate::chain::ChainMode;
use crate::middleware::DEFAULT_FRAME_BUDGET;

/// Settings for a [`DecisionEngine`](crate::DecisionEngine).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub chain_mode: ChainMode,
    /// Cycles slower than this are logged as warnings.
    pub frame_budget: Duration,
    /// Log the start and outcome of every think cycle at `info`.
    pub decision_logging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chain_mode: ChainMode::Lenient,
            frame_budget: DEFAULT_FRAME_BUDGET,
            decision_logging: false,
        }
    }
}

impl EngineConfig {
    pub const fn new(chain_mode: ChainMode, frame_budget: Duration, decision_logging: bool) -> Self {
        Self {
            chain_mode,
            frame_budget,
            decision_logging,
        }
    }

    pub fn with_chain_mode(mut self, chain_mode: ChainMode) -> Self {
        self.chain_mode = chain_mode;
        self
    }

    pub fn with_frame_budget(mut self, frame_budget: Duration) -> Self {
        self.frame_budget = frame_budget;
        self
    }

    pub fn with_decision_logging(mut self, enabled: bool) -> Self {
        self.decision_logging = enabled;
        self
    }
}
