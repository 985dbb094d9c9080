use npc_core::{Actuator, Observer, Vec3};

use crate::fsm::{State, StateContext, StateTimer};

const THREAT_RANGE: f32 = 30.0;
const FLEE_DISTANCE: f32 = 20.0;
const SAFE_RADIUS: f32 = 30.0;
const SPRINT_SECONDS: f32 = 5.0;

/// Runs directly away from nearby enemies, sprinting for a limited time.
#[derive(Clone, Debug, Default)]
pub struct FleeState {
    timer: StateTimer,
}

impl State for FleeState {
    fn enter(&mut self, _ctx: &mut StateContext<'_>) {
        self.timer.reset();
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.advance(ctx.clock.dt);

        let observer = Observer::of(ctx.agent);
        let enemies = ctx.world.nearby_enemies(&observer, THREAT_RANGE);
        let winded = self.timer.elapsed() > SPRINT_SECONDS;

        let Some(center) = Vec3::centroid(enemies.iter().map(|e| e.position)) else {
            ctx.agent.sprint(false);
            return;
        };

        let away = (ctx.agent.position - center).normalized();
        ctx.agent.move_to(ctx.agent.position + away * FLEE_DISTANCE);
        ctx.agent.sprint(!winded);

        if let Some(safe) = ctx.world.find_safe_position(&observer, SAFE_RADIUS) {
            ctx.agent.move_to(safe);
        }
    }

    fn exit(&mut self, ctx: &mut StateContext<'_>) {
        ctx.agent.sprint(false);
    }
}
