use crate::{AgentView, Vec3, WorldView};

/// Immutable copy of the world taken at the start of a think cycle.
///
/// Cheap to share behind an `Arc`; every agent thinking in the same frame can
/// read one snapshot without locks.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub agents: Vec<AgentView>,
    pub cover_positions: Vec<Vec3>,
    pub points_of_interest: Vec<Vec3>,
    pub patrol_waypoints: Vec<Vec3>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, agent: AgentView) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_cover(mut self, position: Vec3) -> Self {
        self.cover_positions.push(position);
        self
    }

    pub fn with_point_of_interest(mut self, position: Vec3) -> Self {
        self.points_of_interest.push(position);
        self
    }

    pub fn with_waypoint(mut self, position: Vec3) -> Self {
        self.patrol_waypoints.push(position);
        self
    }
}

impl WorldView for WorldSnapshot {
    fn agents(&self) -> &[AgentView] {
        &self.agents
    }

    fn cover_positions(&self) -> &[Vec3] {
        &self.cover_positions
    }

    fn points_of_interest(&self) -> &[Vec3] {
        &self.points_of_interest
    }

    fn patrol_waypoints(&self) -> &[Vec3] {
        &self.patrol_waypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Agent, AgentId, Observer, Team};

    fn view(id: u32, team: Team, x: f32) -> AgentView {
        AgentView::of(&Agent::new(AgentId(id), format!("a{id}"), team).with_position(Vec3::new(x, 0.0, 0.0)))
    }

    fn observer() -> Observer {
        Observer {
            id: AgentId(1),
            team: Team::Player,
            position: Vec3::ZERO,
        }
    }

    #[test]
    fn queries_are_team_aware() {
        let world = WorldSnapshot::new()
            .with_agent(view(1, Team::Player, 0.0))
            .with_agent(view(2, Team::Player, 5.0))
            .with_agent(view(3, Team::Enemy, 10.0))
            .with_agent(view(4, Team::Enemy, 40.0))
            .with_agent(view(5, Team::Neutral, 3.0));

        let enemies: Vec<_> = world.nearby_enemies(&observer(), 20.0).iter().map(|a| a.id).collect();
        assert_eq!(enemies, [AgentId(3)]);

        let allies: Vec<_> = world.nearby_allies(&observer(), 20.0).iter().map(|a| a.id).collect();
        assert_eq!(allies, [AgentId(2)]);
    }

    #[test]
    fn dead_agents_are_invisible() {
        let mut corpse = view(3, Team::Enemy, 10.0);
        corpse.alive = false;
        let world = WorldSnapshot::new().with_agent(corpse);

        assert!(world.nearby_enemies(&observer(), 20.0).is_empty());
        assert_eq!(world.find_safe_position(&observer(), 30.0), None);
    }

    #[test]
    fn cover_must_shield_from_threat() {
        let world = WorldSnapshot::new()
            .with_cover(Vec3::new(5.0, 0.0, 0.0))
            .with_cover(Vec3::new(-5.0, 0.0, 0.0));

        let cover = world.find_nearest_cover(Vec3::ZERO, Vec3::new(15.0, 0.0, 0.0));
        assert_eq!(cover, Some(Vec3::new(-5.0, 0.0, 0.0)));
        assert!(world.has_cover_near(Vec3::new(-2.0, 0.0, 0.0), 5.0));
        assert!(!world.has_cover_near(Vec3::new(0.0, 0.0, 20.0), 5.0));
    }

    #[test]
    fn safe_position_avoids_enemies() {
        let world = WorldSnapshot::new().with_agent(view(3, Team::Enemy, 25.0));

        let safe = world.find_safe_position(&observer(), 30.0);
        let Some(safe) = safe else {
            panic!("expected a safe position");
        };
        assert!(safe.distance(Vec3::new(25.0, 0.0, 0.0)) > 24.0);
        assert!((safe.distance(Vec3::ZERO) - 30.0).abs() < 1e-3);
    }
}
