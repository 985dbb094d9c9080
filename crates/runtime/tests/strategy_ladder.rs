use std::sync::Arc;

use ai_runtime::events::{ValidateStrategy, decide_strategy};
use ai_runtime::{
    DecisionContext, Event, EventContext, Metrics, SimClock, StateMachine, keys,
};
use npc_core::{Agent, AgentId, Strategy, Team, WorldSnapshot};
use strum::IntoEnumIterator;

fn metrics(health: f32, enemies: f32, allies: f32, threat: f32) -> Metrics {
    let mut metrics = Metrics::default();
    metrics.set(keys::HEALTH_PERCENT, health);
    metrics.set(keys::ENEMY_COUNT, enemies);
    metrics.set(keys::ALLY_COUNT, allies);
    metrics.set(keys::THREAT_LEVEL, threat);
    metrics
}

#[test]
fn ladder_picks_first_matching_rule() {
    let cases = [
        (metrics(0.2, 3.0, 2.0, 0.9), Strategy::Retreat, 0.95),
        (metrics(0.9, 0.0, 0.0, 0.0), Strategy::Stealth, 0.8),
        (metrics(0.5, 1.0, 1.0, 0.9), Strategy::Support, 0.85),
        (metrics(1.0, 4.0, 1.0, 0.2), Strategy::Defensive, 0.9),
        (metrics(1.0, 1.0, 0.0, 0.8), Strategy::Defensive, 0.75),
        (metrics(1.0, 1.0, 0.0, 0.3), Strategy::Aggressive, 0.7),
    ];

    for (metrics, strategy, confidence) in cases {
        assert_eq!(decide_strategy(&metrics), (strategy, confidence), "{metrics:?}");
    }
}

fn validate(health: f32, strategy: Strategy, confidence: f32) -> (Strategy, f32) {
    let mut ctx = DecisionContext::new(
        Agent::new(AgentId(1), "Hero", Team::Player),
        StateMachine::new(),
        Arc::new(WorldSnapshot::new()),
        SimClock::default(),
    );
    ctx.metrics_mut().set(keys::HEALTH_PERCENT, health);
    ctx.data.strategy = strategy;
    ctx.data.strategy_confidence = confidence;

    let outcome = ValidateStrategy.execute(&mut ctx).expect("health present");
    assert!(outcome.success);
    (ctx.data.strategy, ctx.data.strategy_confidence)
}

#[test]
fn every_strategy_retreats_below_critical_health() {
    for strategy in Strategy::iter().filter(|s| *s != Strategy::Retreat) {
        let (result, confidence) = validate(0.1, strategy, 0.8);

        assert_eq!(result, Strategy::Retreat, "{strategy}");
        assert!((confidence - 0.8 * 0.9).abs() < 1e-6, "{strategy}: {confidence}");
    }
}

#[test]
fn critical_health_threshold_is_exclusive() {
    for strategy in Strategy::iter() {
        assert_eq!(validate(0.15, strategy, 0.8), (strategy, 0.8), "{strategy}");
    }
}

#[test]
fn critical_health_overrides_strategy() {
    let mut ctx = DecisionContext::new(
        Agent::new(AgentId(1), "Hero", Team::Player),
        StateMachine::new(),
        Arc::new(WorldSnapshot::new()),
        SimClock::default(),
    );
    ctx.metrics_mut().set(keys::HEALTH_PERCENT, 0.1);
    ctx.data.strategy = Strategy::Aggressive;
    ctx.data.strategy_confidence = 0.7;

    let outcome = ValidateStrategy.execute(&mut ctx).expect("health present");

    assert!(outcome.success);
    assert_eq!(ctx.data.strategy, Strategy::Retreat);
    assert!((ctx.data.strategy_confidence - 0.63).abs() < 1e-6);
}

#[test]
fn retreat_is_left_alone() {
    let mut ctx = DecisionContext::new(
        Agent::new(AgentId(1), "Hero", Team::Player),
        StateMachine::new(),
        Arc::new(WorldSnapshot::new()),
        SimClock::default(),
    );
    ctx.metrics_mut().set(keys::HEALTH_PERCENT, 0.1);
    ctx.data.strategy = Strategy::Retreat;
    ctx.data.strategy_confidence = 0.95;

    ValidateStrategy.execute(&mut ctx).expect("health present");
    assert_eq!(ctx.data.strategy_confidence, 0.95);
}
