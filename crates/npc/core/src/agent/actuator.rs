//! Actuator surface: the commands decision layers may issue to an agent.

use rand::Rng;

use super::{Agent, Capabilities, Cue, Effect, MED_KIT_AMOUNT, RELOAD_SECONDS};
use crate::{AgentView, Observer, Vec3, WorldView, clamp_unit};

/// Shots lose all accuracy at this distance.
const MAX_SHOT_RANGE: f32 = 30.0;

/// Result of a [`Actuator::shoot`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotOutcome {
    /// Could not fire (no ammo, reloading, dead target).
    Blocked,
    Missed,
    Hit { damage: f32 },
}

/// Commands an agent accepts from the operational and tactical layers.
///
/// Calls that would affect other agents only queue an [`Effect`].
pub trait Actuator {
    /// Sets a movement destination. Returns `false` if the agent cannot move.
    fn move_to(&mut self, position: Vec3) -> bool;
    fn sprint(&mut self, enable: bool);
    /// Holds position for `seconds`.
    fn wait(&mut self, seconds: f32);
    fn aim_at(&mut self, position: Vec3);
    fn shoot(&mut self, target: &AgentView) -> ShotOutcome;
    /// Self-heal. Returns `false` at full health.
    fn use_med_kit(&mut self) -> bool;
    /// Field heal on an ally.
    fn heal_ally(&mut self, ally: &AgentView) -> bool;
    fn throw_grenade(&mut self, position: Vec3) -> bool;
    /// Starts a reload. Returns `false` if already full or reloading.
    fn reload(&mut self) -> bool;
    fn take_cover(&mut self, position: Vec3) -> bool;
    /// Picks the first visible enemy as target if none is set.
    fn scan_for_enemies(&mut self, world: &dyn WorldView, range: f32);
    fn search_area(&mut self, center: Vec3, radius: f32);
    fn call_out(&mut self, position: Vec3);
    fn look_at_nearest(&mut self, points: &[Vec3]);
    fn set_rotation_speed(&mut self, degrees_per_second: f32);
    fn play_cue(&mut self, cue: Cue);
}

impl Actuator for Agent {
    fn move_to(&mut self, position: Vec3) -> bool {
        if !self.can_move() {
            return false;
        }
        self.destination = Some(position);
        if !self.sprinting {
            self.play_cue(Cue::Walk);
        }
        true
    }

    fn sprint(&mut self, enable: bool) {
        if self.sprinting != enable {
            self.sprinting = enable;
            self.play_cue(if enable { Cue::Sprint } else { Cue::Walk });
        }
    }

    fn wait(&mut self, seconds: f32) {
        self.pause.start(seconds);
    }

    fn aim_at(&mut self, position: Vec3) {
        let mut direction = position - self.position;
        direction.y = 0.0;
        let direction = direction.normalized();
        if direction != Vec3::ZERO {
            self.facing = direction;
        }
    }

    fn shoot(&mut self, target: &AgentView) -> ShotOutcome {
        if !self.can_attack() || self.ammo == 0 || !target.alive {
            return ShotOutcome::Blocked;
        }

        self.ammo -= 1;
        self.play_cue(Cue::Shoot);

        let distance = self.position.distance(target.position);
        let accuracy = clamp_unit(1.0 - distance / MAX_SHOT_RANGE);

        if self.rng().gen_bool(f64::from(accuracy)) {
            let damage = self.rng().gen_range(10.0..25.0);
            tracing::debug!("{} hit {} for {:.1} damage", self.name, target.name, damage);
            self.queue_effect(Effect::Hit {
                target: target.id,
                damage,
            });
            ShotOutcome::Hit { damage }
        } else {
            tracing::debug!("{} missed {}", self.name, target.name);
            ShotOutcome::Missed
        }
    }

    fn use_med_kit(&mut self) -> bool {
        if self.health >= self.max_health {
            return false;
        }
        let healed = self.restore_health(MED_KIT_AMOUNT);
        tracing::debug!("{} used med kit, healed {:.1} HP", self.name, healed);
        self.play_cue(Cue::Heal);
        healed > 0.0
    }

    fn heal_ally(&mut self, ally: &AgentView) -> bool {
        if !self.can_heal() || !ally.alive || ally.health >= ally.max_health {
            return false;
        }
        self.queue_effect(Effect::Heal {
            target: ally.id,
            amount: MED_KIT_AMOUNT,
        });
        self.play_cue(Cue::Heal);
        true
    }

    fn throw_grenade(&mut self, position: Vec3) -> bool {
        if self.grenades == 0 {
            return false;
        }
        self.grenades -= 1;
        self.play_cue(Cue::Throw);
        tracing::debug!("{} threw grenade at {}", self.name, position);
        self.queue_effect(Effect::Grenade { position });
        true
    }

    fn reload(&mut self) -> bool {
        if self.ammo >= self.max_ammo || self.reload.is_active() {
            return false;
        }
        self.reload.start(RELOAD_SECONDS);
        self.capabilities.remove(Capabilities::ATTACK);
        self.play_cue(Cue::Reload);
        true
    }

    fn take_cover(&mut self, position: Vec3) -> bool {
        if !self.move_to(position) {
            return false;
        }
        self.cover_position = Some(position);
        true
    }

    fn scan_for_enemies(&mut self, world: &dyn WorldView, range: f32) {
        if self.current_target.is_some() {
            return;
        }
        let observer = Observer::of(self);
        if let Some(enemy) = world.nearby_enemies(&observer, range).first() {
            tracing::debug!("{} spotted enemy: {}", self.name, enemy.name);
            self.current_target = Some(enemy.id);
        }
    }

    fn search_area(&mut self, center: Vec3, radius: f32) {
        let points = [
            center + Vec3::FORWARD * radius,
            center + Vec3::RIGHT * radius,
            center + Vec3::BACK * radius,
            center + Vec3::LEFT * radius,
        ];
        self.look_at_nearest(&points);
    }

    fn call_out(&mut self, position: Vec3) {
        tracing::debug!("{} calling out enemy at {}", self.name, position);
        self.queue_effect(Effect::CallOut { position });
    }

    fn look_at_nearest(&mut self, points: &[Vec3]) {
        let origin = self.position;
        let nearest = points
            .iter()
            .copied()
            .min_by(|a, b| origin.distance(*a).total_cmp(&origin.distance(*b)));
        if let Some(point) = nearest {
            self.aim_at(point);
        }
    }

    fn set_rotation_speed(&mut self, degrees_per_second: f32) {
        self.rotation_speed = degrees_per_second.max(0.0);
    }

    fn play_cue(&mut self, cue: Cue) {
        self.last_cue = Some(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgentId, Team};

    fn target_at(position: Vec3) -> AgentView {
        AgentView::of(&Agent::new(AgentId(9), "Target", Team::Enemy).with_position(position))
    }

    #[test]
    fn reload_blocks_attack_until_complete() {
        let mut agent = Agent::new(AgentId(1), "Gunner", Team::Player).with_ammo(2);
        assert!(agent.reload());
        assert!(!agent.can_attack());
        assert!(!agent.reload());

        let target = target_at(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(agent.shoot(&target), ShotOutcome::Blocked);

        agent.advance(1.0);
        assert_eq!(agent.ammo, 2);
        agent.advance(1.0);
        assert_eq!(agent.ammo, 30);
        assert!(agent.can_attack());
    }

    #[test]
    fn point_blank_shot_hits_and_queues_damage() {
        let mut agent = Agent::new(AgentId(1), "Gunner", Team::Player).with_seed(7);
        let target = target_at(Vec3::ZERO);

        match agent.shoot(&target) {
            ShotOutcome::Hit { damage } => assert!((10.0..25.0).contains(&damage)),
            other => panic!("expected a hit, got {other:?}"),
        }
        assert_eq!(agent.ammo, 29);
        assert!(matches!(
            agent.pending_effects(),
            [Effect::Hit { target, .. }] if *target == AgentId(9)
        ));
    }

    #[test]
    fn out_of_range_shot_always_misses() {
        let mut agent = Agent::new(AgentId(1), "Gunner", Team::Player);
        let target = target_at(Vec3::new(45.0, 0.0, 0.0));
        assert_eq!(agent.shoot(&target), ShotOutcome::Missed);
        assert!(agent.pending_effects().is_empty());
    }

    #[test]
    fn med_kit_fails_at_full_health() {
        let mut agent = Agent::new(AgentId(1), "Medic", Team::Player);
        assert!(!agent.use_med_kit());

        agent.health = 30.0;
        assert!(agent.use_med_kit());
        assert_eq!(agent.health, 80.0);
    }

    #[test]
    fn grenades_run_out() {
        let mut agent = Agent::new(AgentId(1), "Grenadier", Team::Player);
        assert!(agent.throw_grenade(Vec3::ZERO));
        assert!(agent.throw_grenade(Vec3::ZERO));
        assert!(!agent.throw_grenade(Vec3::ZERO));
        assert_eq!(agent.take_effects().len(), 2);
    }
}
