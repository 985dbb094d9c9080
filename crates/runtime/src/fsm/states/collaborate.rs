use npc_core::{Actuator, Observer};

use crate::fsm::{State, StateContext, StateTimer};

const ALLY_RANGE: f32 = 20.0;
const REGROUP_BEYOND: f32 = 8.0;
const SPREAD_WITHIN: f32 = 3.0;
const SPREAD_DISTANCE: f32 = 5.0;
const CALL_OUT_RANGE: f32 = 25.0;

/// Sticks near the most wounded ally and supports their fight.
#[derive(Clone, Debug, Default)]
pub struct CollaborateState {
    timer: StateTimer,
    last_shot: Option<f32>,
}

impl State for CollaborateState {
    fn enter(&mut self, _ctx: &mut StateContext<'_>) {
        self.timer.reset();
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.advance(ctx.clock.dt);

        let world = ctx.world;
        let observer = Observer::of(ctx.agent);
        let Some(ally) = world
            .nearby_allies(&observer, ALLY_RANGE)
            .into_iter()
            .min_by(|a, b| a.health_fraction().total_cmp(&b.health_fraction()))
        else {
            return;
        };

        let distance = observer.position.distance(ally.position);
        if distance > REGROUP_BEYOND {
            ctx.agent.move_to(ally.position);
        } else if distance < SPREAD_WITHIN {
            let away = (observer.position - ally.position).normalized();
            ctx.agent.move_to(ally.position + away * SPREAD_DISTANCE);
        } else {
            let target = ally
                .current_target
                .and_then(|id| world.agent(id))
                .filter(|t| t.alive);
            if let Some(target) = target {
                ctx.agent.aim_at(target.position);
                let ready = self
                    .last_shot
                    .is_none_or(|at| ctx.clock.now - at >= ctx.agent.fire_rate);
                if ready {
                    ctx.agent.shoot(target);
                    self.last_shot = Some(ctx.clock.now);
                }
            }

            for enemy in world.nearby_enemies(&observer, CALL_OUT_RANGE) {
                ctx.agent.call_out(enemy.position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use npc_core::{Agent, AgentId, AgentView, Effect, Team, Vec3, WorldSnapshot};

    use super::*;
    use crate::context::SimClock;

    #[test]
    fn spreads_out_from_hugging_ally() {
        let ally = Agent::new(AgentId(2), "Buddy", Team::Player).with_position(Vec3::new(1.0, 0.0, 0.0));
        let world = WorldSnapshot::new().with_agent(AgentView::of(&ally));

        let mut agent = Agent::new(AgentId(1), "Medic", Team::Player);
        let mut ctx = StateContext {
            agent: &mut agent,
            world: &world,
            clock: SimClock::new(0.0, 1.0),
        };

        let mut collaborate = CollaborateState::default();
        collaborate.enter(&mut ctx);
        collaborate.update(&mut ctx);
        assert_eq!(ctx.agent.destination, Some(Vec3::new(-4.0, 0.0, 0.0)));
    }

    #[test]
    fn supports_ally_and_calls_out_enemies() {
        let enemy = Agent::new(AgentId(3), "Raider", Team::Enemy).with_position(Vec3::new(12.0, 0.0, 0.0));
        let mut ally = Agent::new(AgentId(2), "Buddy", Team::Player)
            .with_position(Vec3::new(5.0, 0.0, 0.0))
            .with_health(40.0);
        ally.current_target = Some(enemy.id);
        let world = WorldSnapshot::new()
            .with_agent(AgentView::of(&ally))
            .with_agent(AgentView::of(&enemy));

        let mut agent = Agent::new(AgentId(1), "Medic", Team::Player);
        let mut ctx = StateContext {
            agent: &mut agent,
            world: &world,
            clock: SimClock::new(0.0, 1.0),
        };

        let mut collaborate = CollaborateState::default();
        collaborate.enter(&mut ctx);
        collaborate.update(&mut ctx);

        assert_eq!(ctx.agent.ammo, 29);
        assert!(
            ctx.agent
                .pending_effects()
                .iter()
                .any(|e| matches!(e, Effect::CallOut { position } if *position == Vec3::new(12.0, 0.0, 0.0)))
        );
    }
}
