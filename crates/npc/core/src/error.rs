use thiserror::Error;

use crate::AgentId;

/// Errors raised by the mutable [`World`](crate::World) registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentId),

    #[error("agent {0} is not registered")]
    UnknownAgent(AgentId),
}
