//! Condition leaves for the tactical tree.
//!
//! Conditions read the context and return Success or Failure. They never emit
//! actions and never touch the agent.

use behavior_tree::{Behavior, Status};
use npc_core::{Mode, Vec3};

use super::{ENGAGE_RANGE, TacticalContext};

/// Radius within which enemies count as grouped.
pub const GROUP_RADIUS: f32 = 5.0;

/// Enemies (the one measured from included) needed for a group.
pub const GROUP_SIZE: usize = 3;

/// Succeeds when the tree is evaluated for the given mode.
pub struct InMode(pub Mode);

impl Behavior<TacticalContext> for InMode {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        Status::from_bool(ctx.mode == self.0)
    }
}

/// Health fraction strictly below `threshold`.
pub struct IsHealthCritical {
    pub threshold: f32,
}

impl Behavior<TacticalContext> for IsHealthCritical {
    fn name(&self) -> &str {
        "IsHealthCritical"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        Status::from_bool(ctx.agent.health_fraction() < self.threshold)
    }
}

/// Fewer than `threshold` rounds left in the magazine.
pub struct IsAmmoLow {
    pub threshold: u32,
}

impl Behavior<TacticalContext> for IsAmmoLow {
    fn name(&self) -> &str {
        "IsAmmoLow"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        Status::from_bool(ctx.agent.ammo < self.threshold)
    }
}

/// Has a grenade and some visible enemy stands with at least two others
/// within [`GROUP_RADIUS`].
pub struct HasGroupedEnemies;

impl Behavior<TacticalContext> for HasGroupedEnemies {
    fn name(&self) -> &str {
        "HasGroupedEnemies"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        if ctx.agent.grenades == 0 {
            return Status::Failure;
        }

        let observer = ctx.observer();
        let positions: Vec<Vec3> = ctx
            .world
            .nearby_enemies(&observer, ENGAGE_RANGE)
            .iter()
            .map(|e| e.position)
            .collect();

        let grouped = positions.iter().any(|anchor| {
            positions
                .iter()
                .filter(|p| anchor.distance(**p) < GROUP_RADIUS)
                .count()
                >= GROUP_SIZE
        });
        Status::from_bool(grouped)
    }
}
