//! Turns emitted actions into actuator calls.

use npc_core::{Action, ActionKind, Actuator, AgentId, ShotOutcome, WorldView};
use tracing::debug;

/// Radius handed to [`Actuator::search_area`] for Search actions.
pub const SEARCH_RADIUS: f32 = 5.0;

/// Tally of one dispatch pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Calls the actuator accepted.
    pub executed: usize,
    /// Calls the actuator refused (no ammo, already reloading, ...).
    pub rejected: usize,
    /// Idle actions and actions missing their target.
    pub skipped: usize,
}

/// Maps actions onto an [`Actuator`], resolving target agents through a
/// [`WorldView`].
#[derive(Clone, Copy, Debug)]
pub struct ActionDispatcher {
    search_radius: f32,
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self {
            search_radius: SEARCH_RADIUS,
        }
    }
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `actions` in order. `actor_id` tells self-heals from field heals.
    pub fn dispatch<A>(
        &self,
        actor: &mut A,
        actor_id: AgentId,
        actions: &[Action],
        world: &dyn WorldView,
    ) -> DispatchReport
    where
        A: Actuator + ?Sized,
    {
        let mut report = DispatchReport::default();

        for action in actions {
            match self.apply(actor, actor_id, action, world) {
                Some(true) => report.executed += 1,
                Some(false) => {
                    debug!("{} rejected {}", actor_id, action.kind());
                    report.rejected += 1;
                }
                None => report.skipped += 1,
            }
        }
        report
    }

    /// `None` when the action has nothing to execute.
    fn apply<A>(
        &self,
        actor: &mut A,
        actor_id: AgentId,
        action: &Action,
        world: &dyn WorldView,
    ) -> Option<bool>
    where
        A: Actuator + ?Sized,
    {
        let target_view = action.target_agent().and_then(|id| world.agent(id));

        match action.kind() {
            ActionKind::Move => action.target_position().map(|to| actor.move_to(to)),
            ActionKind::Attack => {
                let target = target_view?;
                Some(!matches!(actor.shoot(target), ShotOutcome::Blocked))
            }
            ActionKind::Aim => {
                let at = action
                    .target_position()
                    .or_else(|| target_view.map(|t| t.position))?;
                actor.aim_at(at);
                Some(true)
            }
            ActionKind::Heal => match target_view {
                Some(ally) if ally.id != actor_id => Some(actor.heal_ally(ally)),
                _ => Some(actor.use_med_kit()),
            },
            ActionKind::Sprint => {
                actor.sprint(true);
                Some(true)
            }
            ActionKind::TakeCover => action.target_position().map(|at| actor.take_cover(at)),
            ActionKind::ThrowGrenade => {
                action.target_position().map(|at| actor.throw_grenade(at))
            }
            ActionKind::Search => action.target_position().map(|at| {
                actor.search_area(at, self.search_radius);
                true
            }),
            ActionKind::Reload => Some(actor.reload()),
            ActionKind::Idle => None,
        }
    }
}
