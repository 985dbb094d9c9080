//! Strategic layer: read the situation and pick a posture.

use std::time::Instant;

use npc_core::{Observer, Strategy, clamp_unit};
use tracing::{debug, warn};

use crate::chain::{Event, EventContext, EventError, EventOutcome, Metrics};
use crate::context::{DecisionContext, keys};

/// Enemies farther than this are ignored by the strategic layer.
pub const ENEMY_SCAN_RANGE: f32 = 20.0;

/// Allies farther than this are ignored by the strategic layer.
pub const ALLY_SCAN_RANGE: f32 = 15.0;

/// Below this health fraction a non-retreat strategy is overridden.
pub const FORCED_RETREAT_HEALTH: f32 = 0.15;

/// Confidence multiplier applied when the strategy is overridden.
pub const OVERRIDE_PENALTY: f32 = 0.9;

/// Summed enemy rating, scaled up as health drops, squashed into `[0, 1]`.
pub fn threat_level(ratings: impl IntoIterator<Item = f32>, health_fraction: f32) -> f32 {
    let total: f32 = ratings.into_iter().sum();
    clamp_unit(total * (1.0 / health_fraction.max(0.1)) / 10.0)
}

/// First matching rule of the strategy ladder.
///
/// Missing metrics read as threat 0, health 1 and zero counts.
pub fn decide_strategy(metrics: &Metrics) -> (Strategy, f32) {
    let health = metrics.get_or(keys::HEALTH_PERCENT, 1.0);
    let threat = metrics.get_or(keys::THREAT_LEVEL, 0.0);
    let enemies = metrics.get_or(keys::ENEMY_COUNT, 0.0);
    let allies = metrics.get_or(keys::ALLY_COUNT, 0.0);

    if health < 0.25 {
        (Strategy::Retreat, 0.95)
    } else if enemies == 0.0 {
        (Strategy::Stealth, 0.8)
    } else if allies > 0.0 && health < 0.6 {
        (Strategy::Support, 0.85)
    } else if enemies > allies + 2.0 {
        (Strategy::Defensive, 0.9)
    } else if threat > 0.7 {
        (Strategy::Defensive, 0.75)
    } else {
        (Strategy::Aggressive, 0.7)
    }
}

/// Counts nearby enemies and allies and rates the threat.
pub struct GatherIntelligence;

impl Event<DecisionContext> for GatherIntelligence {
    fn name(&self) -> &'static str {
        "GatherIntelligence"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let started = Instant::now();

        let observer = Observer::of(&ctx.agent);
        let health = ctx.agent.health_fraction();
        let ammo = ctx.agent.ammo_fraction();
        let enemies = ctx.world.nearby_enemies(&observer, ENEMY_SCAN_RANGE);
        let enemy_count = enemies.len();
        let threat = threat_level(enemies.iter().map(|e| e.combat_rating), health);
        let ally_count = ctx.world.nearby_allies(&observer, ALLY_SCAN_RANGE).len();

        let metrics = ctx.metrics_mut();
        metrics.set(keys::ENEMY_COUNT, enemy_count as f32);
        metrics.set(keys::ALLY_COUNT, ally_count as f32);
        metrics.set(keys::HEALTH_PERCENT, health);
        metrics.set(keys::AMMO_PERCENT, ammo);
        metrics.set(keys::THREAT_LEVEL, threat);

        debug!(
            "{}: {} enemies, {} allies, threat {:.2}",
            ctx.agent.name, enemy_count, ally_count, threat
        );
        ctx.timers.strategic = started.elapsed().as_secs_f32();
        Ok(EventOutcome::success())
    }
}

pub struct DetermineStrategy;

impl Event<DecisionContext> for DetermineStrategy {
    fn name(&self) -> &'static str {
        "DetermineStrategy"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let (strategy, confidence) = decide_strategy(ctx.metrics());
        ctx.data.strategy = strategy;
        ctx.data.strategy_confidence = confidence;
        debug!("{}: strategy {} ({:.2})", ctx.agent.name, strategy, confidence);
        Ok(EventOutcome::success())
    }
}

/// Forces a retreat when health is about to run out.
pub struct ValidateStrategy;

impl Event<DecisionContext> for ValidateStrategy {
    fn name(&self) -> &'static str {
        "ValidateStrategy"
    }

    fn execute(&self, ctx: &mut DecisionContext) -> Result<EventOutcome, EventError> {
        let health = ctx.metrics().require(keys::HEALTH_PERCENT)?;

        if health < FORCED_RETREAT_HEALTH && ctx.data.strategy != Strategy::Retreat {
            warn!(
                "{}: health {:.2}, overriding {} with retreat",
                ctx.agent.name, health, ctx.data.strategy
            );
            ctx.data.strategy = Strategy::Retreat;
            ctx.data.strategy_confidence = clamp_unit(ctx.data.strategy_confidence * OVERRIDE_PENALTY);
        }
        Ok(EventOutcome::success())
    }
}
