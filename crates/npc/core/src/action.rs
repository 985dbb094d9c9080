//! Prioritized actions emitted by a think cycle.

use crate::{AgentId, Vec3};

/// What an [`Action`] asks the actuator to do.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Move,
    Attack,
    Aim,
    Heal,
    Sprint,
    TakeCover,
    ThrowGrenade,
    Search,
    Reload,
    Idle,
}

/// A single prioritized request produced by the tactical layer.
///
/// Immutable once built. Higher priority is dispatched first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    kind: ActionKind,
    target_position: Option<Vec3>,
    target_agent: Option<AgentId>,
    priority: f32,
}

impl Action {
    /// Negative or NaN priorities are clamped to zero.
    pub fn new(kind: ActionKind, priority: f32) -> Self {
        Self {
            kind,
            target_position: None,
            target_agent: None,
            priority: if priority.is_nan() { 0.0 } else { priority.max(0.0) },
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.target_position = Some(position);
        self
    }

    pub fn targeting(mut self, agent: AgentId) -> Self {
        self.target_agent = Some(agent);
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn target_position(&self) -> Option<Vec3> {
        self.target_position
    }

    pub fn target_agent(&self) -> Option<AgentId> {
        self.target_agent
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }
}

/// Stable sort by descending priority; equal priorities keep emission order.
pub fn sort_by_priority(actions: &mut [Action]) {
    actions.sort_by(|a, b| b.priority.total_cmp(&a.priority));
}
