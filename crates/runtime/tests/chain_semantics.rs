use std::sync::Arc;

use ai_runtime::events::{
    DetermineStrategy, GatherIntelligence, LearnFromOutcome, ValidateStrategy,
};
use ai_runtime::{
    ChainError, DecisionContext, EventChain, EventContext, EventError, SimClock, StateMachine,
};
use npc_core::{Agent, AgentId, Team, WorldSnapshot};

fn context() -> DecisionContext {
    DecisionContext::new(
        Agent::new(AgentId(1), "Scout", Team::Player),
        StateMachine::new(),
        Arc::new(WorldSnapshot::new()),
        SimClock::default(),
    )
}

#[test]
fn strict_chain_aborts_on_missing_metric() {
    let chain = EventChain::strict()
        .with_event(DetermineStrategy)
        .with_event(ValidateStrategy)
        .with_event(GatherIntelligence);

    let mut ctx = context();
    let err = chain.execute(&mut ctx).unwrap_err();

    let ChainError::Aborted {
        event,
        source,
        partial,
    } = err
    else {
        panic!("expected an abort");
    };
    assert_eq!(event, "ValidateStrategy");
    assert_eq!(source, EventError::MissingMetric("health_percent"));
    assert_eq!(partial.records.len(), 2);
    assert!(partial.records[0].success);
    assert!(!partial.records[1].success);
    assert!(partial.record("GatherIntelligence").is_none());
    assert_eq!(ctx.errors().len(), 1);
}

#[test]
fn lenient_chain_records_missing_metric_and_continues() {
    let chain = EventChain::lenient()
        .with_event(LearnFromOutcome)
        .with_event(GatherIntelligence);

    let mut ctx = context();
    let result = chain.execute(&mut ctx).expect("lenient chains do not abort");

    assert!(result.success);
    let learn = result.record("LearnFromOutcome").expect("record");
    assert!(!learn.success);
    assert_eq!(learn.precision, 0.0);
    assert!(result.record("GatherIntelligence").is_some_and(|r| r.success));
    assert!((result.precision - 0.5).abs() < 1e-6);
    assert!(ctx.agent.history.is_empty());
    assert_eq!(ctx.errors().len(), 1);
}

#[test]
fn ordered_events_see_each_others_metrics() {
    let chain = EventChain::strict()
        .with_event(GatherIntelligence)
        .with_event(DetermineStrategy)
        .with_event(ValidateStrategy);

    let mut ctx = context();
    let result = chain.execute(&mut ctx).expect("well ordered");

    assert!(result.success);
    assert_eq!(result.records.len(), 3);
    let names: Vec<_> = result.records.iter().map(|r| r.event).collect();
    assert_eq!(names, ["GatherIntelligence", "DetermineStrategy", "ValidateStrategy"]);
    assert!(ctx.errors().is_empty());
}
