use ai_runtime::ChainMode;
use ai_sim::{Outcome, Scenario, SimConfig, Simulation};
use npc_core::{Mode, Team};
use strum::IntoEnumIterator;

fn config(scenario: Scenario) -> SimConfig {
    SimConfig {
        scenario,
        max_frames: 20,
        ..SimConfig::default()
    }
}

#[tokio::test]
async fn every_scenario_runs_to_a_report() {
    for scenario in Scenario::iter() {
        let report = Simulation::new(config(scenario)).unwrap().run().await.unwrap();

        assert_eq!(report.scenario, scenario);
        assert!(report.frames >= 1 && report.frames <= 20, "{scenario}");
        assert_eq!(
            report.survivors.player + report.survivors.enemy,
            report.agents.iter().filter(|a| a.alive).count()
        );
        assert!(
            report.agents.iter().filter(|a| a.alive).all(|a| a.decisions >= 1),
            "{scenario}"
        );
    }
}

#[tokio::test]
async fn frame_loop_stops_once_a_side_is_wiped_out() {
    let report = Simulation::new(SimConfig {
        max_frames: 200,
        ..config(Scenario::SimpleCombat)
    })
    .unwrap()
    .run()
    .await
    .unwrap();

    if report.frames < 200 {
        assert!(report.survivors.player == 0 || report.survivors.enemy == 0);
        assert_ne!(report.outcome, Outcome::Draw);
    }
}

#[tokio::test]
async fn first_frame_puts_simple_combat_agents_in_combat() {
    let mut sim = Simulation::new(config(Scenario::SimpleCombat)).unwrap();
    let stats = sim.step().await.unwrap();

    assert_eq!(stats.thought, 2);
    assert!(stats.dispatched > 0);
    assert_eq!(sim.frame(), 1);

    let hero = &sim.world().agents()[0];
    assert_eq!(hero.name, "Hero");
    assert_eq!(hero.mode, Mode::Combat);
    assert_eq!(hero.history.len(), 1);
    assert_eq!(hero.current_target, Some(sim.world().agents()[1].id));
}

#[tokio::test]
async fn patrol_guard_spots_the_infiltrator() {
    let mut sim = Simulation::new(config(Scenario::PatrolEncounter)).unwrap();
    sim.step().await.unwrap();

    let guard = sim.world().agents().iter().find(|a| a.name == "Guard").unwrap();
    assert_eq!(guard.team, Team::Enemy);
    assert_ne!(guard.mode, Mode::Patrol);
    assert_eq!(guard.history.len(), 1);
}

#[tokio::test]
async fn parallel_frames_think_every_agent() {
    let mut sim = Simulation::new(SimConfig {
        parallel: true,
        ..config(Scenario::TeamFight)
    })
    .unwrap();
    let stats = sim.step().await.unwrap();
    assert_eq!(stats.thought, 4);

    let report = sim.run().await.unwrap();
    assert!(report.agents.iter().filter(|a| a.alive).all(|a| a.decisions >= 1));
}

#[tokio::test]
async fn same_seed_replays_identically() {
    let run = || async {
        Simulation::new(config(Scenario::TeamFight))
            .unwrap()
            .run()
            .await
            .unwrap()
    };
    assert_eq!(run().await, run().await);
}

#[tokio::test]
async fn strict_chain_still_completes() {
    let report = Simulation::new(SimConfig {
        chain_mode: ChainMode::Strict,
        ..config(Scenario::Collaboration)
    })
    .unwrap()
    .run()
    .await
    .unwrap();

    assert_eq!(report.scenario, Scenario::Collaboration);
    assert!(report.frames >= 1);
}
