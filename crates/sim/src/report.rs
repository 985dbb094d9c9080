//! End-of-run summary.

use std::fmt;

use npc_core::{AgentId, Mode, Team, World};
use serde::Serialize;
use strum::Display;

use crate::scenario::Scenario;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "title_case")]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerVictory,
    EnemyVictory,
    Draw,
}

impl Outcome {
    /// More survivors wins; equal counts are a draw.
    pub fn from_survivors(player: usize, enemy: usize) -> Self {
        match player.cmp(&enemy) {
            std::cmp::Ordering::Greater => Outcome::PlayerVictory,
            std::cmp::Ordering::Less => Outcome::EnemyVictory,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Survivors {
    pub player: usize,
    pub enemy: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub name: String,
    pub team: Team,
    pub alive: bool,
    pub health: f32,
    /// Records in the agent's decision history.
    pub decisions: usize,
    pub mode: Mode,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimReport {
    pub scenario: Scenario,
    pub frames: usize,
    pub outcome: Outcome,
    pub survivors: Survivors,
    pub agents: Vec<AgentSummary>,
}

impl SimReport {
    pub fn from_world(scenario: Scenario, frames: usize, world: &World) -> Self {
        let survivors = Survivors {
            player: world.living_count(Team::Player),
            enemy: world.living_count(Team::Enemy),
        };
        let agents = world
            .agents()
            .iter()
            .map(|agent| AgentSummary {
                id: agent.id,
                name: agent.name.clone(),
                team: agent.team,
                alive: agent.is_alive(),
                health: agent.health,
                decisions: agent.history.len(),
                mode: agent.mode,
            })
            .collect();

        Self {
            scenario,
            frames,
            outcome: Outcome::from_survivors(survivors.player, survivors.enemy),
            survivors,
            agents,
        }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.scenario)?;
        writeln!(f, "Frames:   {}", self.frames)?;
        writeln!(
            f,
            "Outcome:  {} ({} player / {} enemy standing)",
            self.outcome, self.survivors.player, self.survivors.enemy
        )?;
        for agent in &self.agents {
            let status = if agent.alive { "alive" } else { "down" };
            writeln!(
                f,
                "  {:<12} {:<7} {:<5} {:>5.1} hp  {:>3} decisions  {}",
                agent.name, agent.team, status, agent.health, agent.decisions, agent.mode
            )?;
        }
        Ok(())
    }
}
