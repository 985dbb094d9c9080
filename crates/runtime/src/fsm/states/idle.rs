use npc_core::{Actuator, Cue};

use crate::fsm::{State, StateContext, StateTimer};

/// Degrees per second while idling.
const IDLE_ROTATION_SPEED: f32 = 30.0;

/// Seconds of idling before the bored cue plays.
const BORED_AFTER: f32 = 5.0;

/// Stands still and glances at the closest point of interest.
#[derive(Clone, Debug, Default)]
pub struct IdleState {
    timer: StateTimer,
    bored: bool,
}

impl State for IdleState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.reset();
        self.bored = false;
        ctx.agent.set_rotation_speed(IDLE_ROTATION_SPEED);
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) {
        self.timer.advance(ctx.clock.dt);
        ctx.agent.look_at_nearest(ctx.world.points_of_interest());

        if !self.bored && self.timer.elapsed() > BORED_AFTER {
            ctx.agent.play_cue(Cue::Bored);
            self.bored = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use npc_core::{Agent, AgentId, Team, Vec3, WorldSnapshot};

    use super::*;
    use crate::context::SimClock;

    #[test]
    fn gets_bored_once_after_five_seconds() {
        let mut agent = Agent::new(AgentId(1), "Sentry", Team::Enemy);
        let world = WorldSnapshot::new().with_point_of_interest(Vec3::new(3.0, 0.0, 0.0));
        let mut ctx = StateContext {
            agent: &mut agent,
            world: &world,
            clock: SimClock::new(0.0, 2.0),
        };

        let mut idle = IdleState::default();
        idle.enter(&mut ctx);
        assert_eq!(ctx.agent.rotation_speed, IDLE_ROTATION_SPEED);

        idle.update(&mut ctx);
        idle.update(&mut ctx);
        assert_eq!(ctx.agent.last_cue, None);
        assert_eq!(ctx.agent.facing, Vec3::RIGHT);

        idle.update(&mut ctx);
        assert_eq!(ctx.agent.last_cue, Some(Cue::Bored));
    }
}
