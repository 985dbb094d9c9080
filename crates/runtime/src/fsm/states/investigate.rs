use npc_core::{Actuator, Observer, Vec3};
use tracing::info;

use crate::fsm::{State, StateContext, StateTimer};

const ARRIVAL_RADIUS: f32 = 2.0;
const SEARCH_RADIUS: f32 = 5.0;
const DETECTION_RANGE: f32 = 20.0;
const TIMEOUT_SECONDS: f32 = 15.0;

/// Walks to a suspicious position and searches around it.
#[derive(Clone, Debug, Default)]
pub struct InvestigateState {
    timer: StateTimer,
    position: Option<Vec3>,
    timed_out: bool,
}

impl InvestigateState {
    pub fn position(&self) -> Option<Vec3> {
        self.position
    }
}

impl State for InvestigateState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.reset();
        self.timed_out = false;
        // A call-out received before entering seeds the search.
        self.position = ctx.agent.investigation_point;
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.advance(ctx.clock.dt);

        if let Some(position) = self.position {
            ctx.agent.move_to(position);
            if ctx.agent.position.distance(position) < ARRIVAL_RADIUS {
                ctx.agent.search_area(position, SEARCH_RADIUS);
            }
        }

        let observer = Observer::of(ctx.agent);
        if let Some(enemy) = ctx.world.nearby_enemies(&observer, DETECTION_RANGE).first() {
            self.position = Some(enemy.last_known_position);
            ctx.agent.investigation_point = self.position;
        }

        if !self.timed_out && self.timer.elapsed() > TIMEOUT_SECONDS {
            info!("{} investigation timed out", ctx.agent.name);
            self.timed_out = true;
        }
    }
}
