//! Simulator configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use ai_runtime::{ChainMode, EngineConfig};
use ai_runtime::middleware::DEFAULT_FRAME_BUDGET;

use crate::scenario::Scenario;

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub scenario: Scenario,
    pub max_frames: usize,
    /// Simulated seconds per frame.
    pub time_step: f32,
    /// Real-time pause between frames; zero runs flat out.
    pub think_interval: Duration,
    pub seed: u64,
    /// Think all agents of a frame concurrently against one snapshot.
    pub parallel: bool,
    pub chain_mode: ChainMode,
    pub frame_budget: Duration,
    pub debug_log: bool,
    pub report_json: bool,
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::SimpleCombat,
            max_frames: 30,
            time_step: 1.0,
            think_interval: Duration::ZERO,
            seed: 42,
            parallel: false,
            chain_mode: ChainMode::Lenient,
            frame_budget: DEFAULT_FRAME_BUDGET,
            debug_log: false,
            report_json: false,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_SCENARIO` - Scenario name, e.g. `team-fight` (default: simple-combat)
    /// - `SIM_MAX_FRAMES` - Frame limit (default: 30)
    /// - `SIM_TIME_STEP` - Simulated seconds per frame (default: 1.0)
    /// - `SIM_THINK_INTERVAL_MS` - Real-time delay between frames (default: 0)
    /// - `SIM_SEED` - Seed for shot rolls (default: 42)
    /// - `SIM_PARALLEL` - Think concurrently (default: false)
    /// - `SIM_CHAIN_MODE` - `lenient` or `strict` (default: lenient)
    /// - `SIM_FRAME_BUDGET_MS` - Think cycle budget (default: 16)
    /// - `SIM_DEBUG_LOG` - Log every think cycle (default: false)
    /// - `SIM_REPORT_JSON` - Print the report as JSON (default: false)
    /// - `SIM_LOG_DIR` - Also write `sim.log` to this directory (default: unset)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(scenario) = read_env::<Scenario>("SIM_SCENARIO") {
            config.scenario = scenario;
        }
        if let Some(frames) = read_env::<usize>("SIM_MAX_FRAMES") {
            config.max_frames = frames.max(1);
        }
        if let Some(step) = read_env::<f32>("SIM_TIME_STEP")
            && step.is_finite()
            && step > 0.0
        {
            config.time_step = step;
        }
        if let Some(ms) = read_env::<u64>("SIM_THINK_INTERVAL_MS") {
            config.think_interval = Duration::from_millis(ms);
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }
        if let Some(parallel) = read_env_bool("SIM_PARALLEL") {
            config.parallel = parallel;
        }
        if let Some(mode) = read_env::<ChainMode>("SIM_CHAIN_MODE") {
            config.chain_mode = mode;
        }
        if let Some(ms) = read_env::<u64>("SIM_FRAME_BUDGET_MS") {
            config.frame_budget = Duration::from_millis(ms);
        }
        if let Some(debug) = read_env_bool("SIM_DEBUG_LOG") {
            config.debug_log = debug;
        }
        if let Some(json) = read_env_bool("SIM_REPORT_JSON") {
            config.report_json = json;
        }
        config.log_dir = env::var_os("SIM_LOG_DIR").map(PathBuf::from);

        config
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.chain_mode, self.frame_budget, self.debug_log)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    parse_bool(&env::var(key).ok()?)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
