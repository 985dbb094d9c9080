//! Sensor surface and world storage.
//!
//! [`WorldView`] is what the decision layers see: a read-only query API over
//! an immutable set of [`AgentView`]s plus static level data. The provided
//! methods implement every spatial query on top of four accessors, so any
//! backing store only needs to hand out slices.

mod registry;
mod snapshot;

pub use registry::{CALL_OUT_RANGE, GRENADE_DAMAGE, GRENADE_RADIUS, World};
pub use snapshot::WorldSnapshot;

use arrayvec::ArrayVec;

use crate::{Agent, AgentId, Capabilities, Team, Vec3};

/// Number of candidate points sampled around the seeker by
/// [`WorldView::find_safe_position`].
pub const SAFE_POSITION_SAMPLES: usize = 16;

/// Who is asking. Needed to tell allies from enemies and to exclude self.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
    pub id: AgentId,
    pub team: Team,
    pub position: Vec3,
}

impl Observer {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            team: agent.team,
            position: agent.position,
        }
    }
}

/// Read-only copy of an agent as other agents perceive it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id: AgentId,
    pub name: String,
    pub team: Team,
    pub position: Vec3,
    pub last_known_position: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub combat_rating: f32,
    pub capabilities: Capabilities,
    pub current_target: Option<AgentId>,
    pub alive: bool,
}

impl AgentView {
    pub fn of(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            name: agent.name.clone(),
            team: agent.team,
            position: agent.position,
            last_known_position: agent.last_known_position,
            health: agent.health,
            max_health: agent.max_health,
            combat_rating: agent.combat_rating,
            capabilities: agent.capabilities,
            current_target: agent.current_target,
            alive: agent.is_alive(),
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

/// Read-only sensor surface consumed by every decision layer.
///
/// Implementations must be safe to share across threads: parallel think
/// cycles read the same snapshot.
pub trait WorldView: Send + Sync {
    fn agents(&self) -> &[AgentView];
    fn cover_positions(&self) -> &[Vec3];
    fn points_of_interest(&self) -> &[Vec3];
    fn patrol_waypoints(&self) -> &[Vec3];

    fn agent(&self, id: AgentId) -> Option<&AgentView> {
        self.agents().iter().find(|a| a.id == id)
    }

    /// Living hostile agents within `range`, in registration order.
    fn nearby_enemies(&self, observer: &Observer, range: f32) -> Vec<&AgentView> {
        self.agents()
            .iter()
            .filter(|a| {
                a.alive
                    && observer.team.is_hostile_to(a.team)
                    && a.position.distance(observer.position) <= range
            })
            .collect()
    }

    /// Living same-team agents within `range`, excluding the observer.
    fn nearby_allies(&self, observer: &Observer, range: f32) -> Vec<&AgentView> {
        self.agents()
            .iter()
            .filter(|a| {
                a.alive
                    && a.id != observer.id
                    && a.team == observer.team
                    && a.position.distance(observer.position) <= range
            })
            .collect()
    }

    /// Nearest cover that sits between `from` and `threat`.
    fn find_nearest_cover(&self, from: Vec3, threat: Vec3) -> Option<Vec3> {
        self.cover_positions()
            .iter()
            .copied()
            .filter(|&cover| is_cover_viable(cover, from, threat))
            .min_by(|a, b| from.distance(*a).total_cmp(&from.distance(*b)))
    }

    fn has_cover_near(&self, position: Vec3, radius: f32) -> bool {
        self.cover_positions()
            .iter()
            .any(|cover| cover.distance(position) <= radius)
    }

    /// First point on a ring of `radius` around the observer whose nearest
    /// living enemy is farther than `0.8 * radius`. `None` without enemies.
    fn find_safe_position(&self, observer: &Observer, radius: f32) -> Option<Vec3> {
        let enemies: Vec<Vec3> = self
            .agents()
            .iter()
            .filter(|a| a.alive && observer.team.is_hostile_to(a.team))
            .map(|a| a.position)
            .collect();

        if enemies.is_empty() {
            return None;
        }

        ring_samples(observer.position, radius)
            .into_iter()
            .find(|candidate| {
                enemies
                    .iter()
                    .map(|enemy| enemy.distance(*candidate))
                    .fold(f32::INFINITY, f32::min)
                    > radius * 0.8
            })
    }
}

/// Cover is viable when the seeker is meaningfully closer to it than the
/// threat is, and moving to it does not close distance to the threat.
pub fn is_cover_viable(cover: Vec3, seeker: Vec3, threat: Vec3) -> bool {
    let to_seeker = cover.distance(seeker);
    let to_threat = cover.distance(threat);
    if to_seeker > to_threat * 0.8 {
        return false;
    }

    let toward_threat = (threat - cover).normalized();
    let toward_cover = (cover - seeker).normalized();
    toward_threat.dot(toward_cover) < 0.0
}

fn ring_samples(center: Vec3, radius: f32) -> ArrayVec<Vec3, SAFE_POSITION_SAMPLES> {
    (0..SAFE_POSITION_SAMPLES)
        .map(|i| {
            let angle = (i as f32 * (360.0 / SAFE_POSITION_SAMPLES as f32)).to_radians();
            center + Vec3::new(angle.cos(), 0.0, angle.sin()) * radius
        })
        .collect()
}
