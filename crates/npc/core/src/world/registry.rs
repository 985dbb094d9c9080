use tracing::{debug, info};

use crate::{Agent, AgentId, AgentView, Effect, Observer, Team, Vec3, WorldError, WorldSnapshot};

/// Blast radius of a grenade.
pub const GRENADE_RADIUS: f32 = 5.0;
/// Flat damage dealt to every living agent inside the blast radius.
pub const GRENADE_DAMAGE: f32 = 30.0;
/// Allies within this range of a call-out start investigating it.
pub const CALL_OUT_RANGE: f32 = 25.0;

/// Mutable world state owned by the simulation.
///
/// Agents live here between think cycles. Registration and removal need
/// exclusive access; think cycles only ever see a [`WorldSnapshot`].
#[derive(Debug, Default)]
pub struct World {
    agents: Vec<Agent>,
    cover_positions: Vec<Vec3>,
    points_of_interest: Vec<Vec3>,
    patrol_waypoints: Vec<Vec3>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, agent: Agent) -> Result<AgentId, WorldError> {
        if self.agents.iter().any(|a| a.id == agent.id) {
            return Err(WorldError::DuplicateAgent(agent.id));
        }
        let id = agent.id;
        debug!("registered {} ({}) on team {}", agent.name, id, agent.team);
        self.agents.push(agent);
        Ok(id)
    }

    pub fn unregister(&mut self, id: AgentId) -> Result<Agent, WorldError> {
        let index = self
            .agents
            .iter()
            .position(|a| a.id == id)
            .ok_or(WorldError::UnknownAgent(id))?;
        Ok(self.agents.remove(index))
    }

    pub fn add_cover(&mut self, position: Vec3) {
        self.cover_positions.push(position);
    }

    pub fn add_point_of_interest(&mut self, position: Vec3) {
        self.points_of_interest.push(position);
    }

    pub fn add_waypoint(&mut self, position: Vec3) {
        self.patrol_waypoints.push(position);
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|a| a.id).collect()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            agents: self.agents.iter().map(AgentView::of).collect(),
            cover_positions: self.cover_positions.clone(),
            points_of_interest: self.points_of_interest.clone(),
            patrol_waypoints: self.patrol_waypoints.clone(),
        }
    }

    /// Drains the effect outbox of `source` and applies it to the world.
    pub fn apply_effects(&mut self, source: AgentId) -> Result<usize, WorldError> {
        let (effects, observer) = {
            let agent = self
                .agent_mut(source)
                .ok_or(WorldError::UnknownAgent(source))?;
            (agent.take_effects(), Observer::of(agent))
        };
        let applied = effects.len();

        for effect in effects {
            match effect {
                Effect::Hit { target, damage } => {
                    if let Some(victim) = self.agent_mut(target) {
                        victim.take_damage(damage);
                    }
                }
                Effect::Heal { target, amount } => {
                    if let Some(ally) = self.agent_mut(target) {
                        let healed = ally.restore_health(amount);
                        debug!("{} received {:.1} HP from {}", ally.name, healed, source);
                    }
                }
                Effect::Grenade { position } => {
                    for victim in self.agents.iter_mut().filter(|a| {
                        a.id != source && a.is_alive() && a.position.distance(position) <= GRENADE_RADIUS
                    }) {
                        info!("{} caught in grenade blast at {}", victim.name, position);
                        victim.take_damage(GRENADE_DAMAGE);
                    }
                }
                Effect::CallOut { position } => {
                    for ally in self.agents.iter_mut().filter(|a| {
                        a.id != source
                            && a.is_alive()
                            && a.team == observer.team
                            && a.position.distance(observer.position) <= CALL_OUT_RANGE
                    }) {
                        ally.investigation_point.get_or_insert(position);
                    }
                }
            }
        }

        Ok(applied)
    }

    /// Advances every living agent by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for agent in &mut self.agents {
            agent.advance(dt);
        }
    }

    pub fn living_count(&self, team: Team) -> usize {
        self.agents
            .iter()
            .filter(|a| a.is_alive() && a.team == team)
            .count()
    }
}
