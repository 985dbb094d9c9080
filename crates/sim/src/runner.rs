//! Frame loop driving every agent through the decision engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use ai_runtime::{ActionDispatcher, DecisionEngine, SimClock, StateMachine, ThinkError, ThinkOutcome};
use npc_core::{AgentId, Team, World, WorldError, WorldView};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::report::SimReport;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("think task panicked")]
    Join(#[source] JoinError),
}

/// Counters for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub thought: usize,
    /// Cycles whose chain failed or aborted; their actions were not dispatched.
    pub failed: usize,
    pub dispatched: usize,
}

pub struct Simulation {
    config: SimConfig,
    world: World,
    engine: Arc<DecisionEngine>,
    dispatcher: ActionDispatcher,
    machines: BTreeMap<AgentId, StateMachine>,
    frame: usize,
    elapsed: f32,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let world = config.scenario.build(config.seed)?;
        Ok(Self::with_world(config, world))
    }

    /// Runs `world` instead of building the configured scenario.
    pub fn with_world(config: SimConfig, world: World) -> Self {
        let engine = Arc::new(DecisionEngine::new(config.engine_config()));
        Self {
            config,
            world,
            engine,
            dispatcher: ActionDispatcher::new(),
            machines: BTreeMap::new(),
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// True once the Player or Enemy side has nobody left standing.
    pub fn is_decided(&self) -> bool {
        self.world.living_count(Team::Player) == 0 || self.world.living_count(Team::Enemy) == 0
    }

    /// Runs frames until one side is wiped out or the frame limit is reached.
    pub async fn run(mut self) -> Result<SimReport, SimError> {
        info!(
            "Running {} for up to {} frames ({})",
            self.config.scenario,
            self.config.max_frames,
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        while self.frame < self.config.max_frames && !self.is_decided() {
            let stats = self.step().await?;
            debug!(
                "frame {}: {} thought, {} failed, {} actions dispatched",
                self.frame, stats.thought, stats.failed, stats.dispatched
            );

            if !self.config.think_interval.is_zero() {
                tokio::time::sleep(self.config.think_interval).await;
            }
        }

        let report = SimReport::from_world(self.config.scenario, self.frame, &self.world);
        info!("{} finished after {} frames: {}", report.scenario, report.frames, report.outcome);
        Ok(report)
    }

    /// Runs one frame and advances the world by the configured time step.
    pub async fn step(&mut self) -> Result<FrameStats, SimError> {
        let clock = SimClock::new(self.elapsed, self.config.time_step);
        let stats = if self.config.parallel {
            self.think_parallel(clock).await?
        } else {
            self.think_sequential(clock)?
        };

        self.world.advance(self.config.time_step);
        self.elapsed += self.config.time_step;
        self.frame += 1;
        Ok(stats)
    }

    /// Each agent sees the effects of those that thought before it.
    fn think_sequential(&mut self, clock: SimClock) -> Result<FrameStats, SimError> {
        let mut stats = FrameStats::default();

        for id in self.world.ids() {
            let snapshot: Arc<dyn WorldView> = Arc::new(self.world.snapshot());
            let Some(agent) = self.world.agent_mut(id) else {
                continue;
            };
            if !agent.is_alive() {
                continue;
            }

            let fsm = self.machines.entry(id).or_default();
            let outcome = self.engine.think(agent, fsm, Arc::clone(&snapshot), clock);
            let executed = match &outcome {
                Ok(o) if o.succeeded() => {
                    self.dispatcher
                        .dispatch(agent, id, &o.actions, snapshot.as_ref())
                        .executed
                }
                _ => 0,
            };
            stats.tally(&outcome, executed);

            self.world.apply_effects(id)?;
        }

        Ok(stats)
    }

    /// Every agent thinks against the same frame-start snapshot on the
    /// blocking pool; effects are applied afterwards in id order.
    async fn think_parallel(&mut self, clock: SimClock) -> Result<FrameStats, SimError> {
        let snapshot: Arc<dyn WorldView> = Arc::new(self.world.snapshot());
        let mut tasks = Vec::new();

        for agent in self.world.agents().iter().filter(|a| a.is_alive()) {
            let mut agent = agent.clone();
            let mut fsm = self.machines.remove(&agent.id).unwrap_or_default();
            let engine = Arc::clone(&self.engine);
            let world = Arc::clone(&snapshot);
            let dispatcher = self.dispatcher;

            tasks.push(tokio::task::spawn_blocking(move || {
                let outcome = engine.think(&mut agent, &mut fsm, Arc::clone(&world), clock);
                let executed = match &outcome {
                    Ok(o) if o.succeeded() => {
                        let id = agent.id;
                        dispatcher.dispatch(&mut agent, id, &o.actions, world.as_ref()).executed
                    }
                    _ => 0,
                };
                (agent, fsm, outcome, executed)
            }));
        }

        let mut stats = FrameStats::default();
        let mut finished = Vec::with_capacity(tasks.len());
        for task in tasks {
            let (agent, fsm, outcome, executed) = task.await.map_err(SimError::Join)?;
            stats.tally(&outcome, executed);

            let id = agent.id;
            self.machines.insert(id, fsm);
            if let Some(slot) = self.world.agent_mut(id) {
                *slot = agent;
            }
            finished.push(id);
        }

        finished.sort();
        for id in finished {
            self.world.apply_effects(id)?;
        }
        Ok(stats)
    }
}

impl FrameStats {
    fn tally(&mut self, outcome: &Result<ThinkOutcome, ThinkError>, executed: usize) {
        self.thought += 1;
        self.dispatched += executed;
        match outcome {
            Ok(o) if o.succeeded() => {}
            Ok(o) => {
                self.failed += 1;
                debug!("think cycle failed: {:?}", o.chain.failure_reason);
            }
            Err(err) => {
                self.failed += 1;
                warn!("think cycle aborted: {}", err);
            }
        }
    }
}
