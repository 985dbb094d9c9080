use npc_core::AgentId;
use thiserror::Error;

use crate::chain::ChainError;

pub type Result<T> = std::result::Result<T, ThinkError>;

#[derive(Debug, Clone, Error)]
pub enum ThinkError {
    #[error("agent {0} is dead and cannot think")]
    AgentDown(AgentId),

    #[error(transparent)]
    Chain(#[from] ChainError),
}
