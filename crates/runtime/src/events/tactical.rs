//! Tactical layer: run the behavior tree and sanity-check its output.

use std::mem;
use std::sync::Arc;
use std::time::Instant;

use npc_core::{Action, ActionKind, Agent, WorldView, clamp_unit};
use tracing::debug;

use crate::chain::{Event, EventError, EventOutcome};
use crate::context::DecisionContext;
use crate::tactics::{TacticalContext, TacticalTree};

/// Moves shorter than this are pointless.
pub const MIN_DISPLACEMENT: f32 = 0.1;

/// A take-cover target must have cover this close.
pub const COVER_SEARCH_RADIUS: f32 = 5.0;

/// Behavior confidence multiplier when any action is dropped.
pub const INVALID_ACTION_PENALTY: f32 = 0.85;

pub struct ExecuteBehaviorTree {
    tree: TacticalTree,
}

impl ExecuteBehaviorTree {
    pub fn new(tree: TacticalTree) -> Self {
        Self { tree }
    }
}

impl Default for ExecuteBehaviorTree {
    fn default() -> Self {
        Self::new(TacticalTree::standard())
    }
}

impl Event<DecisionContext> for ExecuteBehaviorTree {
    fn name(&self) -> &'static str {
        "ExecuteBehaviorTree"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let started = Instant::now();

        let agent = mem::take(&mut ctx.agent);
        let mut tactical = TacticalContext::new(agent, Arc::clone(&ctx.world), ctx.data.current_state);
        let status = self.tree.tick(&mut tactical);
        let (agent, actions) = tactical.into_parts();
        ctx.agent = agent;

        debug!(
            "{}: tree {:?} in {} with {} actions",
            ctx.agent.name,
            status,
            ctx.data.current_state,
            actions.len()
        );
        ctx.data.actions = actions;
        ctx.data.behavior_confidence = TacticalTree::confidence(status);
        ctx.timers.tactical = started.elapsed().as_secs_f32();
        Ok(EventOutcome::success())
    }
}

/// Drops actions the agent cannot carry out right now.
pub struct ValidateBehavior;

impl Event<DecisionContext> for ValidateBehavior {
    fn name(&self) -> &'static str {
        "ValidateBehavior"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let before = ctx.data.actions.len();
        let agent = &ctx.agent;
        let world = ctx.world.as_ref();
        ctx.data.actions.retain(|action| is_executable(action, agent, world));

        let dropped = before - ctx.data.actions.len();
        if dropped > 0 {
            debug!("{}: dropped {} invalid actions", ctx.agent.name, dropped);
            ctx.data.behavior_confidence =
                clamp_unit(ctx.data.behavior_confidence * INVALID_ACTION_PENALTY);
        }
        Ok(EventOutcome::success())
    }
}

/// Whether `agent` can execute `action` against the current world.
pub fn is_executable(action: &Action, agent: &Agent, world: &dyn WorldView) -> bool {
    match action.kind() {
        ActionKind::Move => {
            agent.can_move()
                && action
                    .target_position()
                    .is_some_and(|to| to.distance(agent.position) > MIN_DISPLACEMENT)
        }
        ActionKind::Attack => {
            agent.can_attack()
                && action
                    .target_agent()
                    .and_then(|id| world.agent(id))
                    .is_some_and(|target| target.alive)
        }
        ActionKind::Heal => {
            if !agent.can_heal() {
                return false;
            }
            match action.target_agent() {
                Some(id) if id != agent.id => world
                    .agent(id)
                    .is_some_and(|ally| ally.alive && ally.health < ally.max_health),
                _ => agent.health < agent.max_health,
            }
        }
        ActionKind::TakeCover => {
            agent.can_move()
                && action
                    .target_position()
                    .is_some_and(|to| world.has_cover_near(to, COVER_SEARCH_RADIUS))
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use npc_core::{AgentId, AgentView, Capabilities, Team, Vec3, WorldSnapshot};

    use super::*;

    #[test]
    fn move_requires_mobility_and_distance() {
        let mut agent = Agent::new(AgentId(1), "Hero", Team::Player);
        let world = WorldSnapshot::new();

        let far = Action::new(ActionKind::Move, 0.5).at(Vec3::new(3.0, 0.0, 0.0));
        let near = Action::new(ActionKind::Move, 0.5).at(Vec3::new(0.05, 0.0, 0.0));
        let nowhere = Action::new(ActionKind::Move, 0.5);
        assert!(is_executable(&far, &agent, &world));
        assert!(!is_executable(&near, &agent, &world));
        assert!(!is_executable(&nowhere, &agent, &world));

        agent.capabilities.remove(Capabilities::MOVE);
        assert!(!is_executable(&far, &agent, &world));
    }

    #[test]
    fn attack_requires_living_target() {
        let agent = Agent::new(AgentId(1), "Hero", Team::Player);
        let mut corpse = Agent::new(AgentId(2), "Raider", Team::Enemy);
        corpse.take_damage(500.0);
        let living = Agent::new(AgentId(3), "Raider", Team::Enemy);
        let world = WorldSnapshot::new()
            .with_agent(AgentView::of(&corpse))
            .with_agent(AgentView::of(&living));

        let shoot = |id| Action::new(ActionKind::Attack, 0.85).targeting(AgentId(id));
        assert!(!is_executable(&shoot(2), &agent, &world));
        assert!(is_executable(&shoot(3), &agent, &world));
        assert!(!is_executable(&shoot(9), &agent, &world));
    }

    #[test]
    fn heal_requires_missing_health() {
        let agent = Agent::new(AgentId(1), "Medic", Team::Player);
        let patient = Agent::new(AgentId(2), "Buddy", Team::Player).with_health(30.0);
        let world = WorldSnapshot::new().with_agent(AgentView::of(&patient));

        let self_heal = Action::new(ActionKind::Heal, 1.0).targeting(AgentId(1));
        let field_heal = Action::new(ActionKind::Heal, 0.9).targeting(AgentId(2));
        assert!(!is_executable(&self_heal, &agent, &world));
        assert!(is_executable(&field_heal, &agent, &world));
    }

    #[test]
    fn take_cover_needs_cover_nearby() {
        let agent = Agent::new(AgentId(1), "Hero", Team::Player);
        let world = WorldSnapshot::new().with_cover(Vec3::new(10.0, 0.0, 0.0));

        let good = Action::new(ActionKind::TakeCover, 0.9).at(Vec3::new(8.0, 0.0, 0.0));
        let bad = Action::new(ActionKind::TakeCover, 0.9).at(Vec3::new(-8.0, 0.0, 0.0));
        assert!(is_executable(&good, &agent, &world));
        assert!(!is_executable(&bad, &agent, &world));
        assert!(is_executable(&Action::new(ActionKind::Sprint, 1.0), &agent, &world));
    }
}
