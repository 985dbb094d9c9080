//! Canned encounters for the simulator.

use npc_core::{Agent, AgentId, Mode, Team, Vec3, World, WorldError};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// One hero against one enemy with two cover spots between them.
    #[default]
    SimpleCombat,
    /// A wounded hero facing three enemies.
    Outnumbered,
    TeamFight,
    /// A guard walking its route meets an infiltrator.
    PatrolEncounter,
    LowHealthRetreat,
    /// A medic keeping a wounded soldier in the fight.
    Collaboration,
}

const GUARD_ROUTE: [Vec3; 4] = [
    Vec3::new(20.0, 0.0, 0.0),
    Vec3::new(30.0, 0.0, 0.0),
    Vec3::new(30.0, 0.0, 10.0),
    Vec3::new(20.0, 0.0, 10.0),
];

impl Scenario {
    /// Builds a fresh world. Every agent's shot RNG is derived from `seed`.
    pub fn build(self, seed: u64) -> Result<World, WorldError> {
        let mut world = World::new();
        let mut roster = Roster::new(seed);

        match self {
            Scenario::SimpleCombat => {
                world.register(roster.spawn("Hero", Team::Player, Vec3::ZERO))?;
                world.register(roster.spawn("Enemy", Team::Enemy, Vec3::new(15.0, 0.0, 0.0)))?;
                world.add_cover(Vec3::new(5.0, 0.0, 0.0));
                world.add_cover(Vec3::new(10.0, 0.0, 0.0));
            }
            Scenario::Outnumbered => {
                world.register(roster.spawn("Hero", Team::Player, Vec3::ZERO).with_health(60.0))?;
                for (name, at) in [
                    ("Enemy1", Vec3::new(10.0, 0.0, 5.0)),
                    ("Enemy2", Vec3::new(10.0, 0.0, -5.0)),
                    ("Enemy3", Vec3::new(15.0, 0.0, 0.0)),
                ] {
                    world.register(roster.spawn(name, Team::Enemy, at))?;
                }
                world.add_cover(Vec3::new(-10.0, 0.0, 0.0));
            }
            Scenario::TeamFight => {
                world.register(roster.spawn("Player1", Team::Player, Vec3::ZERO))?;
                world.register(roster.spawn("Player2", Team::Player, Vec3::new(2.0, 0.0, 2.0)))?;
                world.register(roster.spawn("Enemy1", Team::Enemy, Vec3::new(15.0, 0.0, 0.0)))?;
                world.register(roster.spawn("Enemy2", Team::Enemy, Vec3::new(17.0, 0.0, 2.0)))?;
                world.add_cover(Vec3::new(5.0, 0.0, 0.0));
                world.add_cover(Vec3::new(10.0, 0.0, 0.0));
            }
            Scenario::PatrolEncounter => {
                world.register(roster.spawn("Infiltrator", Team::Player, Vec3::ZERO))?;

                let mut guard = roster
                    .spawn("Guard", Team::Enemy, GUARD_ROUTE[0])
                    .with_mode(Mode::Patrol);
                guard.current_waypoint = Some(GUARD_ROUTE[0]);
                world.register(guard)?;

                for waypoint in GUARD_ROUTE {
                    world.add_waypoint(waypoint);
                }
            }
            Scenario::LowHealthRetreat => {
                world.register(roster.spawn("WoundedHero", Team::Player, Vec3::ZERO).with_health(20.0))?;
                world.register(roster.spawn("Enemy", Team::Enemy, Vec3::new(12.0, 0.0, 0.0)))?;
                world.add_cover(Vec3::new(-5.0, 0.0, 0.0));
            }
            Scenario::Collaboration => {
                world.register(roster.spawn("Medic", Team::Player, Vec3::ZERO))?;
                world.register(
                    roster
                        .spawn("Soldier", Team::Player, Vec3::new(3.0, 0.0, 0.0))
                        .with_health(40.0),
                )?;
                world.register(roster.spawn("Enemy1", Team::Enemy, Vec3::new(15.0, 0.0, 0.0)))?;
                world.register(roster.spawn("Enemy2", Team::Enemy, Vec3::new(18.0, 0.0, 3.0)))?;
            }
        }

        Ok(world)
    }
}

/// Hands out sequential ids starting at 1.
struct Roster {
    next_id: u32,
    seed: u64,
}

impl Roster {
    fn new(seed: u64) -> Self {
        Self { next_id: 1, seed }
    }

    fn spawn(&mut self, name: &str, team: Team, position: Vec3) -> Agent {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        Agent::new(id, name, team)
            .with_seed(self.seed)
            .with_position(position)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn names_parse_in_kebab_case() {
        assert_eq!("team-fight".parse::<Scenario>(), Ok(Scenario::TeamFight));
        assert_eq!("Low-Health-Retreat".parse::<Scenario>(), Ok(Scenario::LowHealthRetreat));
        assert_eq!(Scenario::PatrolEncounter.to_string(), "patrol-encounter");
        assert!("deathmatch".parse::<Scenario>().is_err());
    }

    #[test]
    fn every_scenario_has_both_sides() {
        for scenario in Scenario::iter() {
            let world = scenario.build(7).unwrap();
            assert!(world.living_count(Team::Player) > 0, "{scenario}");
            assert!(world.living_count(Team::Enemy) > 0, "{scenario}");
        }
    }

    #[test]
    fn patrol_guard_starts_on_its_route() {
        let world = Scenario::PatrolEncounter.build(1).unwrap();
        let guard = world.agent(AgentId(2)).unwrap();
        assert_eq!(guard.mode, Mode::Patrol);
        assert_eq!(guard.current_waypoint, Some(Vec3::new(20.0, 0.0, 0.0)));
        assert_eq!(world.snapshot().patrol_waypoints.len(), 4);
    }

    #[test]
    fn wounded_agents_start_below_full_health() {
        let world = Scenario::Collaboration.build(1).unwrap();
        let soldier = world.agent(AgentId(2)).unwrap();
        assert_eq!(soldier.health, 40.0);
        assert_eq!(soldier.name, "Soldier");
    }
}
