use npc_core::{Actuator, Vec3};

use crate::fsm::{State, StateContext, StateTimer};

/// Fixed loop walked in Patrol mode. World waypoints drive the tactical
/// patrol branch, not this state.
const PATROL_ROUTE: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(10.0, 0.0, 0.0),
    Vec3::new(10.0, 0.0, 10.0),
    Vec3::new(0.0, 0.0, 10.0),
];

const ARRIVAL_RADIUS: f32 = 1.0;
const PAUSE_SECONDS: f32 = 2.0;
const SCAN_RANGE: f32 = 15.0;

/// Walks a looping route, pausing at every point.
#[derive(Clone, Debug, Default)]
pub struct PatrolState {
    timer: StateTimer,
    index: usize,
}

impl PatrolState {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl State for PatrolState {
    fn enter(&mut self, _ctx: &mut StateContext<'_>) {
        self.timer.reset();
        self.index = 0;
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.advance(ctx.clock.dt);

        let point = PATROL_ROUTE[self.index % PATROL_ROUTE.len()];

        ctx.agent.move_to(point);
        if ctx.agent.position.distance(point) < ARRIVAL_RADIUS {
            self.index = (self.index + 1) % PATROL_ROUTE.len();
            ctx.agent.wait(PAUSE_SECONDS);
        }

        ctx.agent.scan_for_enemies(ctx.world, SCAN_RANGE);
    }
}
