use npc_core::{Actuator, AgentId, AgentView, Observer, Vec3, WorldView};

use crate::fsm::{State, StateContext, StateTimer};

const ENGAGE_RANGE: f32 = 30.0;
const CLOSE_IN_BEYOND: f32 = 20.0;
const TOO_CLOSE: f32 = 5.0;
const COVER_RADIUS: f32 = 1.0;

/// Holds a target, keeps medium range and fires from cover.
#[derive(Clone, Debug, Default)]
pub struct CombatState {
    timer: StateTimer,
    target: Option<AgentId>,
    last_cover: Option<Vec3>,
    last_shot: Option<f32>,
}

impl CombatState {
    pub fn target(&self) -> Option<AgentId> {
        self.target
    }

    fn acquire<'w>(&self, world: &'w dyn WorldView, observer: &Observer) -> Option<&'w AgentView> {
        self.target
            .and_then(|id| world.agent(id))
            .filter(|target| target.alive)
            .or_else(|| {
                world
                    .nearby_enemies(observer, ENGAGE_RANGE)
                    .into_iter()
                    .min_by(|a, b| {
                        observer
                            .position
                            .distance(a.position)
                            .total_cmp(&observer.position.distance(b.position))
                    })
            })
    }

    fn fire(&mut self, ctx: &mut StateContext<'_>, target: &AgentView) {
        ctx.agent.aim_at(target.position);
        let ready = self
            .last_shot
            .is_none_or(|at| ctx.clock.now - at >= ctx.agent.fire_rate);
        if ready {
            ctx.agent.shoot(target);
            self.last_shot = Some(ctx.clock.now);
        }
    }
}

impl State for CombatState {
    fn enter(&mut self, _ctx: &mut StateContext<'_>) {
        self.timer.reset();
        self.target = None;
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.advance(ctx.clock.dt);

        let world = ctx.world;
        let observer = Observer::of(ctx.agent);
        let Some(target) = self.acquire(world, &observer) else {
            self.target = None;
            return;
        };
        self.target = Some(target.id);
        ctx.agent.current_target = Some(target.id);

        let position = ctx.agent.position;
        let distance = position.distance(target.position);

        if distance > CLOSE_IN_BEYOND {
            ctx.agent.move_to(target.position);
        } else if distance < TOO_CLOSE {
            if let Some(cover) = world.find_nearest_cover(position, target.position) {
                ctx.agent.take_cover(cover);
                self.last_cover = Some(cover);
            }
        } else {
            let at_cover = ctx.agent.in_cover
                || self
                    .last_cover
                    .is_some_and(|cover| position.distance(cover) < COVER_RADIUS);

            if at_cover {
                self.fire(ctx, target);
            } else if let Some(cover) = world.find_nearest_cover(position, target.position) {
                ctx.agent.take_cover(cover);
                self.last_cover = Some(cover);
            } else {
                // Nowhere to hide: fight from here.
                self.fire(ctx, target);
            }
        }
    }
}
