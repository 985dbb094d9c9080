//! Tactical layer: the priority behavior tree that turns a mode into actions.
//!
//! The tree is built once and shared by every agent. Each tick starts from the
//! root and walks branches in priority order:
//!
//! 1. **Emergency**: critical health queues a self-heal, then falls through
//! 2. **Combat**: reload from cover, grenade a cluster, or acquire/aim/shoot
//! 3. **Flee**: find an escape point and sprint to it
//! 4. **Patrol**: walk the world's patrol route
//! 5. **Investigate**: search the last known enemy position
//! 6. **Collaborate**: heal a wounded ally or give cover fire
//! 7. **Idle**: always succeeds
//!
//! Branches 2-6 are guarded by the current mode, so at most one of them can
//! emit actions in a tick.

pub mod actions;
pub mod conditions;

use std::sync::Arc;

use behavior_tree::builder::{always_fail, always_succeed, selector, sequence};
use behavior_tree::{Behavior, Status};
use npc_core::{Action, Agent, Mode, Observer, WorldView};

use self::actions::*;
use self::conditions::*;

/// Range of every enemy query made by the tree.
pub const ENGAGE_RANGE: f32 = 30.0;

/// Health fraction that triggers the emergency branch.
pub const CRITICAL_HEALTH: f32 = 0.2;

/// Magazines below this trigger a reload.
pub const LOW_AMMO: u32 = 5;

/// Confidence reported when the root succeeds.
pub const SUCCESS_CONFIDENCE: f32 = 0.9;

/// Confidence reported otherwise.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

pub type TacticalNode = Box<dyn Behavior<TacticalContext>>;

/// Blackboard for one tree evaluation.
///
/// Owns the agent for the duration of the tick; leaves may update its
/// bookkeeping fields (target, waypoint, escape point, cover).
pub struct TacticalContext {
    pub agent: Agent,
    pub world: Arc<dyn WorldView>,
    pub mode: Mode,
    pub actions: Vec<Action>,
}

impl TacticalContext {
    pub fn new(agent: Agent, world: Arc<dyn WorldView>, mode: Mode) -> Self {
        Self {
            agent,
            world,
            mode,
            actions: Vec::new(),
        }
    }

    pub fn observer(&self) -> Observer {
        Observer::of(&self.agent)
    }

    pub fn emit(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn into_parts(self) -> (Agent, Vec<Action>) {
        (self.agent, self.actions)
    }
}

/// The shared tactical tree.
pub struct TacticalTree {
    root: TacticalNode,
}

impl TacticalTree {
    pub fn new(root: TacticalNode) -> Self {
        Self { root }
    }

    /// Builds the standard priority tree.
    pub fn standard() -> Self {
        Self::new(selector(
            "root",
            vec![
                emergency(),
                combat(),
                flee(),
                patrol(),
                investigate(),
                collaborate(),
                Box::new(Idle),
            ],
        ))
    }

    pub fn tick(&self, ctx: &mut TacticalContext) -> Status {
        self.root.tick(ctx)
    }

    /// Coarse confidence for a root status.
    pub fn confidence(status: Status) -> f32 {
        if status.is_success() {
            SUCCESS_CONFIDENCE
        } else {
            FALLBACK_CONFIDENCE
        }
    }
}

impl Default for TacticalTree {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Branches
// ============================================================================

/// Queues a self-heal but never claims the tick.
fn emergency() -> TacticalNode {
    always_fail(sequence(
        "emergency",
        vec![
            Box::new(IsHealthCritical {
                threshold: CRITICAL_HEALTH,
            }),
            Box::new(EmergencyHeal),
        ],
    ))
}

fn combat() -> TacticalNode {
    sequence(
        "combat",
        vec![
            Box::new(InMode(Mode::Combat)),
            selector(
                "engage",
                vec![
                    sequence(
                        "reload",
                        vec![
                            Box::new(IsAmmoLow {
                                threshold: LOW_AMMO,
                            }),
                            always_succeed(Box::new(TakeCover)),
                            Box::new(Reload),
                        ],
                    ),
                    sequence(
                        "grenade",
                        vec![Box::new(HasGroupedEnemies), Box::new(ThrowGrenade)],
                    ),
                    sequence(
                        "attack",
                        vec![Box::new(AcquireTarget), Box::new(Aim), Box::new(Shoot)],
                    ),
                ],
            ),
        ],
    )
}

fn flee() -> TacticalNode {
    sequence(
        "flee",
        vec![
            Box::new(InMode(Mode::Flee)),
            Box::new(FindEscapeRoute),
            Box::new(SprintAway),
        ],
    )
}

fn patrol() -> TacticalNode {
    sequence(
        "patrol",
        vec![Box::new(InMode(Mode::Patrol)), Box::new(AdvancePatrol)],
    )
}

fn investigate() -> TacticalNode {
    sequence(
        "investigate",
        vec![Box::new(InMode(Mode::Investigate)), Box::new(SearchLastKnown)],
    )
}

fn collaborate() -> TacticalNode {
    sequence(
        "collaborate",
        vec![
            Box::new(InMode(Mode::Collaborate)),
            selector(
                "support",
                vec![Box::new(HealAlly), Box::new(ProvideCoverFire)],
            ),
        ],
    )
}
