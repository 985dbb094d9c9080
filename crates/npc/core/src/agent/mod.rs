//! Agent snapshot, capabilities and the actuator surface.
//!
//! An [`Agent`] is owned by the [`World`](crate::World) between think cycles
//! and lent mutably to exactly one think cycle at a time. Anything an agent
//! does to *other* agents (hits, grenades, call-outs) is queued as an
//! [`Effect`] and applied by the world afterwards.

mod actuator;
mod cooldown;

pub use actuator::{Actuator, ShotOutcome};
pub use cooldown::Cooldown;

use core::fmt;

use bitflags::bitflags;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{DecisionHistory, Mode, Vec3};

/// Sprint multiplies move speed by this factor.
pub const SPRINT_MULTIPLIER: f32 = 1.5;

/// Seconds a reload keeps the weapon unavailable.
pub const RELOAD_SECONDS: f32 = 2.0;

/// Upper bound of a single med kit or field heal.
pub const MED_KIT_AMOUNT: f32 = 50.0;

/// Stable identifier of an agent inside one world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team affiliation. Player and Enemy are hostile to each other; Neutral is
/// hostile to nobody.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Team {
    #[default]
    Player,
    Enemy,
    Neutral,
}

impl Team {
    pub fn is_hostile_to(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Player, Team::Enemy) | (Team::Enemy, Team::Player)
        )
    }
}

bitflags! {
    /// What an agent is currently able to do.
    ///
    /// `ATTACK` is cleared while reloading; `MOVE` and `ATTACK` are cleared on death.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const MOVE   = 1 << 0;
        const ATTACK = 1 << 1;
        const HEAL   = 1 << 2;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Presentation cue (animation trigger, bark). Recorded, never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Cue {
    Walk,
    Sprint,
    Shoot,
    Reload,
    Heal,
    Throw,
    Bored,
    Death,
}

/// Consequence of an actuator call that touches the world outside the agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// A shot landed on `target`.
    Hit { target: AgentId, damage: f32 },
    /// Field heal applied to an ally, capped by their missing health.
    Heal { target: AgentId, amount: f32 },
    /// A grenade detonates at `position`.
    Grenade { position: Vec3 },
    /// Nearby allies are told about an enemy at `position`.
    CallOut { position: Vec3 },
}

/// Mutable per-agent state read by the decision layers.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub team: Team,

    pub health: f32,
    pub max_health: f32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub grenades: u32,
    pub combat_rating: f32,
    pub capabilities: Capabilities,

    /// Minimum seconds between shots.
    pub fire_rate: f32,
    pub move_speed: f32,
    /// Degrees per second.
    pub rotation_speed: f32,

    pub position: Vec3,
    pub facing: Vec3,
    pub last_known_position: Vec3,
    pub destination: Option<Vec3>,
    pub sprinting: bool,

    /// Committed behavioral mode, updated after each successful think cycle.
    pub mode: Mode,
    pub current_target: Option<AgentId>,
    pub current_waypoint: Option<Vec3>,
    pub waypoint_index: usize,
    pub investigation_point: Option<Vec3>,
    pub escape_target: Option<Vec3>,
    pub cover_position: Option<Vec3>,
    pub in_cover: bool,
    pub stunned: bool,

    pub pause: Cooldown,
    pub reload: Cooldown,
    pub last_cue: Option<Cue>,
    pub history: DecisionHistory,

    effects: Vec<Effect>,
    seed: u64,
    /// Seeded from `seed` on the first roll.
    rng: Option<ChaCha8Rng>,
}

/// Unnamed agent that owns no heap memory and has not seeded its RNG, so it
/// can stand in for an agent lent to a think cycle.
impl Default for Agent {
    fn default() -> Self {
        Self::new(AgentId::default(), String::new(), Team::default())
    }
}

impl Agent {
    /// Creates an agent with stock stats: 100 health, 30 ammo, 2 grenades,
    /// combat rating 5.
    pub fn new(id: AgentId, name: impl Into<String>, team: Team) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            health: 100.0,
            max_health: 100.0,
            ammo: 30,
            max_ammo: 30,
            grenades: 2,
            combat_rating: 5.0,
            capabilities: Capabilities::default(),
            fire_rate: 0.5,
            move_speed: 5.0,
            rotation_speed: 180.0,
            position: Vec3::ZERO,
            facing: Vec3::FORWARD,
            last_known_position: Vec3::ZERO,
            destination: None,
            sprinting: false,
            mode: Mode::Idle,
            current_target: None,
            current_waypoint: None,
            waypoint_index: 0,
            investigation_point: None,
            escape_target: None,
            cover_position: None,
            in_cover: false,
            stunned: false,
            pause: Cooldown::default(),
            reload: Cooldown::default(),
            last_cue: None,
            history: DecisionHistory::default(),
            effects: Vec::new(),
            seed: u64::from(id.0),
            rng: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self.last_known_position = position;
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.clamp(0.0, self.max_health);
        self
    }

    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.ammo = ammo.min(self.max_ammo);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Reseeds the shot RNG. Mixed with the id so agents sharing a seed still differ.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed ^ (u64::from(self.id.0) << 32);
        self.rng = None;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        self.capabilities.contains(Capabilities::MOVE)
    }

    #[inline]
    pub fn can_attack(&self) -> bool {
        self.capabilities.contains(Capabilities::ATTACK)
    }

    #[inline]
    pub fn can_heal(&self) -> bool {
        self.capabilities.contains(Capabilities::HEAL)
    }

    /// Health as a fraction of max health; 0 when max health is not positive.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    /// Ammo as a fraction of capacity; 0 when capacity is zero.
    pub fn ammo_fraction(&self) -> f32 {
        if self.max_ammo > 0 {
            self.ammo as f32 / self.max_ammo as f32
        } else {
            0.0
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.is_active()
    }

    /// Applies damage and returns `true` if this killed the agent.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.is_alive() {
            return false;
        }
        self.die();
        true
    }

    /// Restores up to `amount` health; returns the amount actually healed.
    pub fn restore_health(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        let healed = amount.max(0.0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    fn die(&mut self) {
        tracing::info!("{} has been eliminated", self.name);
        self.mode = Mode::Idle;
        self.capabilities.remove(Capabilities::MOVE | Capabilities::ATTACK);
        self.destination = None;
        self.sprinting = false;
        self.in_cover = false;
        self.last_cue = Some(Cue::Death);
    }

    /// Advances kinematics and cooldowns by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.is_alive() {
            return;
        }

        if self.reload.tick(dt) {
            self.ammo = self.max_ammo;
            self.capabilities.insert(Capabilities::ATTACK);
            tracing::debug!("{} reloaded", self.name);
        }

        if self.pause.is_active() {
            self.pause.tick(dt);
        } else if let Some(destination) = self.destination {
            let speed = if self.sprinting {
                self.move_speed * SPRINT_MULTIPLIER
            } else {
                self.move_speed
            };
            self.position = self.position.step_toward(destination, speed * dt);
            if self.position.distance(destination) <= 0.05 {
                self.destination = None;
            }
        }

        self.in_cover = self
            .cover_position
            .is_some_and(|cover| self.position.distance(cover) < 1.0);
        self.last_known_position = self.position;
    }

    /// Drains queued effects for the world to apply.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn pending_effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn queue_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub(crate) fn rng(&mut self) -> &mut ChaCha8Rng {
        let seed = self.seed;
        self.rng.get_or_insert_with(|| ChaCha8Rng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn hostility_is_symmetric_and_neutral_is_peaceful() {
        assert!(Team::Player.is_hostile_to(Team::Enemy));
        assert!(Team::Enemy.is_hostile_to(Team::Player));
        assert!(!Team::Player.is_hostile_to(Team::Player));
        assert!(!Team::Neutral.is_hostile_to(Team::Enemy));
    }

    #[test]
    fn lethal_damage_disables_agent() {
        let mut agent = Agent::new(AgentId(1), "Grunt", Team::Enemy).with_mode(Mode::Combat);
        assert!(!agent.take_damage(40.0));
        assert!(agent.take_damage(80.0));

        assert_eq!(agent.health, 0.0);
        assert_eq!(agent.mode, Mode::Idle);
        assert!(!agent.can_move());
        assert!(!agent.can_attack());
        assert!(!agent.take_damage(10.0));
    }

    #[test]
    fn advance_moves_toward_destination() {
        let mut agent = Agent::new(AgentId(1), "Runner", Team::Player);
        agent.destination = Some(Vec3::new(10.0, 0.0, 0.0));

        agent.advance(1.0);
        assert_eq!(agent.position, Vec3::new(5.0, 0.0, 0.0));

        agent.sprinting = true;
        agent.advance(1.0);
        assert_eq!(agent.position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(agent.destination, None);
    }

    #[test]
    fn pause_holds_position() {
        let mut agent = Agent::new(AgentId(1), "Guard", Team::Enemy);
        agent.destination = Some(Vec3::new(10.0, 0.0, 0.0));
        agent.pause.start(2.0);

        agent.advance(1.0);
        agent.advance(1.0);
        assert_eq!(agent.position, Vec3::ZERO);

        agent.advance(1.0);
        assert_eq!(agent.position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn placeholder_agent_is_unseeded_and_unnamed() {
        let agent = Agent::default();
        assert!(agent.name.is_empty());
        assert_eq!(agent.name.capacity(), 0);
        assert!(agent.rng.is_none());
        assert!(agent.history.is_empty());
    }

    #[test]
    fn rng_seeds_lazily_and_replays() {
        let mut first = Agent::new(AgentId(3), "Shooter", Team::Player).with_seed(11);
        let mut second = first.clone();
        assert!(first.rng.is_none());

        let a = first.rng().gen_range(0..u32::MAX);
        let b = second.rng().gen_range(0..u32::MAX);
        assert_eq!(a, b);
        assert!(first.rng.is_some());
    }

    #[test]
    fn restore_health_is_capped() {
        let mut agent = Agent::new(AgentId(1), "Medic", Team::Player).with_health(80.0);
        assert_eq!(agent.restore_health(MED_KIT_AMOUNT), 20.0);
        assert_eq!(agent.health, 100.0);
    }
}
