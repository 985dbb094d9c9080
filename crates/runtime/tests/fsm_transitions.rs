use std::sync::Arc;

use ai_runtime::{DecisionEngine, SimClock, StateMachine};
use npc_core::{Agent, AgentId, AgentView, Mode, Team, Vec3, WorldSnapshot, WorldView};

fn snapshot(agents: &[&Agent]) -> Arc<dyn WorldView> {
    let world = agents
        .iter()
        .fold(WorldSnapshot::new(), |world, agent| world.with_agent(AgentView::of(agent)));
    Arc::new(world)
}

#[test]
fn staying_in_a_mode_reports_full_confidence() {
    let mut guard = Agent::new(AgentId(1), "Guard", Team::Enemy);
    let engine = DecisionEngine::default();
    let mut fsm = StateMachine::new();

    let world = snapshot(&[&guard]);
    let first = engine
        .think(&mut guard, &mut fsm, Arc::clone(&world), SimClock::new(0.0, 1.0))
        .expect("first cycle");
    let second = engine
        .think(&mut guard, &mut fsm, world, SimClock::new(1.0, 1.0))
        .expect("second cycle");

    assert_eq!(first.mode, Mode::Patrol);
    assert_eq!(first.transition_confidence, 0.95);
    assert_eq!(second.mode, Mode::Patrol);
    assert_eq!(second.transition_confidence, 1.0);
}

#[test]
fn spotting_an_enemy_switches_to_combat() {
    let mut guard = Agent::new(AgentId(1), "Guard", Team::Enemy);
    let engine = DecisionEngine::default();
    let mut fsm = StateMachine::new();

    let calm = snapshot(&[&guard]);
    engine
        .think(&mut guard, &mut fsm, calm, SimClock::new(0.0, 1.0))
        .expect("calm cycle");
    assert_eq!(guard.mode, Mode::Patrol);

    let intruder =
        Agent::new(AgentId(2), "Intruder", Team::Player).with_position(Vec3::new(10.0, 0.0, 0.0));
    let alert = snapshot(&[&guard, &intruder]);
    let outcome = engine
        .think(&mut guard, &mut fsm, alert, SimClock::new(1.0, 1.0))
        .expect("alert cycle");

    assert_eq!(outcome.mode, Mode::Combat);
    assert_eq!(outcome.transition_confidence, 0.95);
    assert_eq!(guard.mode, Mode::Combat);
    assert_eq!(guard.current_target, Some(AgentId(2)));
}

#[test]
fn stunned_agent_is_forced_idle() {
    let mut hero = Agent::new(AgentId(1), "Hero", Team::Player);
    hero.stunned = true;
    let raider = Agent::new(AgentId(2), "Raider", Team::Enemy).with_position(Vec3::new(12.0, 0.0, 0.0));

    let world = snapshot(&[&hero, &raider]);
    let outcome = DecisionEngine::default()
        .think(&mut hero, &mut StateMachine::new(), world, SimClock::default())
        .expect("think cycle");

    assert_eq!(outcome.mode, Mode::Idle);
    assert_eq!(hero.mode, Mode::Idle);
    assert!(outcome.actions.iter().all(|a| a.kind() == npc_core::ActionKind::Idle));
}
