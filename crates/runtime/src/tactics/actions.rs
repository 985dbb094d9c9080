//! Action leaves for the tactical tree.
//!
//! Action leaves append [`Action`]s to the context. Some also remember what
//! they picked on the agent (target, waypoint, escape point, cover) so later
//! leaves and later ticks can reuse it.

use behavior_tree::{Behavior, Status};
use npc_core::{Action, ActionKind, AgentView, Vec3, WorldView};

use super::{ENGAGE_RANGE, TacticalContext};

pub const EMERGENCY_HEAL_PRIORITY: f32 = 1.0;
pub const COVER_MOVE_PRIORITY: f32 = 0.9;
pub const RELOAD_PRIORITY: f32 = 0.9;
pub const GRENADE_PRIORITY: f32 = 0.95;
pub const AIM_PRIORITY: f32 = 0.8;
pub const SHOOT_PRIORITY: f32 = 0.85;
pub const FLEE_PRIORITY: f32 = 1.0;
pub const PATROL_PRIORITY: f32 = 0.5;
pub const SEARCH_PRIORITY: f32 = 0.6;
pub const HEAL_ALLY_PRIORITY: f32 = 0.9;
pub const COVER_FIRE_PRIORITY: f32 = 0.7;
pub const IDLE_PRIORITY: f32 = 0.1;

/// How far a safe escape point may be.
pub const ESCAPE_RADIUS: f32 = 30.0;

/// Allies farther than this are not supported.
pub const SUPPORT_RANGE: f32 = 15.0;

/// Allies below this health fraction get healed.
pub const WOUNDED_THRESHOLD: f32 = 0.5;

/// Waypoints closer than this count as reached.
pub const WAYPOINT_RADIUS: f32 = 1.0;

/// Current target if it is still alive, looked up in the world.
fn live_target<'w>(ctx: &'w TacticalContext) -> Option<&'w AgentView> {
    ctx.agent
        .current_target
        .and_then(|id| ctx.world.agent(id))
        .filter(|target| target.alive)
}

fn nearest<'w>(from: Vec3, candidates: Vec<&'w AgentView>) -> Option<&'w AgentView> {
    candidates
        .into_iter()
        .min_by(|a, b| from.distance(a.position).total_cmp(&from.distance(b.position)))
}

/// Self-heal with a med kit.
pub struct EmergencyHeal;

impl Behavior<TacticalContext> for EmergencyHeal {
    fn name(&self) -> &str {
        "EmergencyHeal"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let id = ctx.agent.id;
        ctx.emit(Action::new(ActionKind::Heal, EMERGENCY_HEAL_PRIORITY).targeting(id));
        Status::Success
    }
}

/// Moves to the nearest cover that shields from the current threat.
///
/// The threat is the current target, else the nearest enemy in range, else
/// the agent's own position.
pub struct TakeCover;

impl Behavior<TacticalContext> for TakeCover {
    fn name(&self) -> &str {
        "TakeCover"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let position = ctx.agent.position;
        let threat = live_target(ctx)
            .map(|t| t.position)
            .or_else(|| {
                let observer = ctx.observer();
                nearest(position, ctx.world.nearby_enemies(&observer, ENGAGE_RANGE))
                    .map(|e| e.position)
            })
            .unwrap_or(position);

        let Some(cover) = ctx.world.find_nearest_cover(position, threat) else {
            return Status::Failure;
        };

        ctx.agent.cover_position = Some(cover);
        ctx.emit(Action::new(ActionKind::Move, COVER_MOVE_PRIORITY).at(cover));
        Status::Success
    }
}

pub struct Reload;

impl Behavior<TacticalContext> for Reload {
    fn name(&self) -> &str {
        "Reload"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        if ctx.agent.ammo >= ctx.agent.max_ammo || ctx.agent.is_reloading() {
            return Status::Failure;
        }
        ctx.emit(Action::new(ActionKind::Reload, RELOAD_PRIORITY));
        Status::Success
    }
}

/// Lobs a grenade at the centroid of visible enemies.
pub struct ThrowGrenade;

impl Behavior<TacticalContext> for ThrowGrenade {
    fn name(&self) -> &str {
        "ThrowGrenade"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let observer = ctx.observer();
        let center = Vec3::centroid(
            ctx.world
                .nearby_enemies(&observer, ENGAGE_RANGE)
                .iter()
                .map(|e| e.position),
        );

        match center {
            Some(center) => {
                ctx.emit(Action::new(ActionKind::ThrowGrenade, GRENADE_PRIORITY).at(center));
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Keeps a living target or picks the nearest enemy in range.
pub struct AcquireTarget;

impl Behavior<TacticalContext> for AcquireTarget {
    fn name(&self) -> &str {
        "AcquireTarget"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        if live_target(ctx).is_some() {
            return Status::Success;
        }

        let observer = ctx.observer();
        let picked = nearest(observer.position, ctx.world.nearby_enemies(&observer, ENGAGE_RANGE))
            .map(|e| e.id);

        ctx.agent.current_target = picked;
        Status::from_bool(picked.is_some())
    }
}

pub struct Aim;

impl Behavior<TacticalContext> for Aim {
    fn name(&self) -> &str {
        "Aim"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let Some((id, position)) = live_target(ctx).map(|t| (t.id, t.position)) else {
            return Status::Failure;
        };
        ctx.emit(
            Action::new(ActionKind::Aim, AIM_PRIORITY)
                .targeting(id)
                .at(position),
        );
        Status::Success
    }
}

pub struct Shoot;

impl Behavior<TacticalContext> for Shoot {
    fn name(&self) -> &str {
        "Shoot"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        if ctx.agent.ammo == 0 {
            return Status::Failure;
        }
        let Some(id) = live_target(ctx).map(|t| t.id) else {
            return Status::Failure;
        };
        ctx.emit(Action::new(ActionKind::Attack, SHOOT_PRIORITY).targeting(id));
        Status::Success
    }
}

/// Finds a safe point and stores it as the escape target.
pub struct FindEscapeRoute;

impl Behavior<TacticalContext> for FindEscapeRoute {
    fn name(&self) -> &str {
        "FindEscapeRoute"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let observer = ctx.observer();
        ctx.agent.escape_target = ctx.world.find_safe_position(&observer, ESCAPE_RADIUS);
        Status::from_bool(ctx.agent.escape_target.is_some())
    }
}

pub struct SprintAway;

impl Behavior<TacticalContext> for SprintAway {
    fn name(&self) -> &str {
        "SprintAway"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let Some(target) = ctx.agent.escape_target else {
            return Status::Failure;
        };
        ctx.emit(Action::new(ActionKind::Move, FLEE_PRIORITY).at(target));
        ctx.emit(Action::new(ActionKind::Sprint, FLEE_PRIORITY));
        Status::Success
    }
}

/// Heads for the current waypoint, advancing along the world's patrol route
/// once it is reached.
pub struct AdvancePatrol;

impl Behavior<TacticalContext> for AdvancePatrol {
    fn name(&self) -> &str {
        "AdvancePatrol"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let position = ctx.agent.position;
        let current = ctx.agent.current_waypoint;
        let waypoint = match current {
            Some(waypoint) if position.distance(waypoint) > WAYPOINT_RADIUS => waypoint,
            _ => {
                let route = ctx.world.patrol_waypoints();
                if route.is_empty() {
                    return Status::Failure;
                }
                let index = if current.is_some() {
                    (ctx.agent.waypoint_index + 1) % route.len()
                } else {
                    ctx.agent.waypoint_index % route.len()
                };
                ctx.agent.waypoint_index = index;
                ctx.agent.current_waypoint = Some(route[index]);
                route[index]
            }
        };

        ctx.emit(Action::new(ActionKind::Move, PATROL_PRIORITY).at(waypoint));
        Status::Success
    }
}

/// Searches around the agent's investigation point.
pub struct SearchLastKnown;

impl Behavior<TacticalContext> for SearchLastKnown {
    fn name(&self) -> &str {
        "SearchLastKnown"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let Some(point) = ctx.agent.investigation_point else {
            return Status::Failure;
        };
        ctx.emit(Action::new(ActionKind::Search, SEARCH_PRIORITY).at(point));
        Status::Success
    }
}

/// Field-heals the most wounded ally in range.
pub struct HealAlly;

impl Behavior<TacticalContext> for HealAlly {
    fn name(&self) -> &str {
        "HealAlly"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        if !ctx.agent.can_heal() {
            return Status::Failure;
        }

        let observer = ctx.observer();
        let patient = ctx
            .world
            .nearby_allies(&observer, SUPPORT_RANGE)
            .into_iter()
            .filter(|ally| ally.health_fraction() < WOUNDED_THRESHOLD)
            .min_by(|a, b| a.health_fraction().total_cmp(&b.health_fraction()))
            .map(|ally| (ally.id, ally.position));

        let Some((id, position)) = patient else {
            return Status::Failure;
        };
        ctx.emit(
            Action::new(ActionKind::Heal, HEAL_ALLY_PRIORITY)
                .targeting(id)
                .at(position),
        );
        Status::Success
    }
}

/// Shoots at whatever the first nearby ally is fighting.
pub struct ProvideCoverFire;

impl Behavior<TacticalContext> for ProvideCoverFire {
    fn name(&self) -> &str {
        "ProvideCoverFire"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        let observer = ctx.observer();
        let world: &dyn WorldView = ctx.world.as_ref();
        let target = world
            .nearby_allies(&observer, SUPPORT_RANGE)
            .into_iter()
            .find_map(|ally| ally.current_target)
            .and_then(|id| world.agent(id))
            .filter(|target| target.alive)
            .map(|target| (target.id, target.position));

        let Some((id, position)) = target else {
            return Status::Failure;
        };
        ctx.emit(
            Action::new(ActionKind::Attack, COVER_FIRE_PRIORITY)
                .targeting(id)
                .at(position),
        );
        Status::Success
    }
}

pub struct Idle;

impl Behavior<TacticalContext> for Idle {
    fn name(&self) -> &str {
        "Idle"
    }

    fn tick(&self, ctx: &mut TacticalContext) -> Status {
        ctx.emit(Action::new(ActionKind::Idle, IDLE_PRIORITY));
        Status::Success
    }
}
