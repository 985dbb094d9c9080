//! Ordered event pipeline with middleware and Strict/Lenient failure policy.
//!
//! An [`EventChain`] runs its [`Event`]s in registration order against one
//! mutable context. Every event leaves an [`EventRecord`]; the chain's
//! precision is the mean of the recorded precisions.
//!
//! # Failure policy
//!
//! | Event returns                 | Lenient                      | Strict                                   |
//! |-------------------------------|------------------------------|------------------------------------------|
//! | `Ok(outcome)` with `!success` | log, continue                | mark failed, stop, `Ok(result)`          |
//! | `Err(fault)`                  | zero-precision record, go on | record, stop, `Err(ChainError::Aborted)` |
//!
//! Middlewares wrap the whole event stage, outermost first.

mod event;
mod middleware;

pub use event::{Event, EventContext, EventError, EventOutcome, Metrics};
pub use middleware::{Middleware, Next, StageResult};

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, warn};

/// How a chain reacts to failing events.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChainMode {
    /// Stop at the first failure.
    Strict,
    /// Log failures and keep going.
    #[default]
    Lenient,
}

/// Trace of one event execution.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    pub event: &'static str,
    pub success: bool,
    pub precision: f32,
    pub duration: Duration,
    pub message: Option<String>,
}

/// Aggregate result of one chain run.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainResult {
    pub success: bool,
    pub records: Vec<EventRecord>,
    /// Mean precision over `records`; 0 when nothing ran.
    pub precision: f32,
    pub total_duration: Duration,
    pub failure_reason: Option<String>,
}

impl Default for ChainResult {
    fn default() -> Self {
        Self {
            success: true,
            records: Vec::new(),
            precision: 0.0,
            total_duration: Duration::ZERO,
            failure_reason: None,
        }
    }
}

impl ChainResult {
    pub fn record(&self, event: &str) -> Option<&EventRecord> {
        self.records.iter().find(|r| r.event == event)
    }

    fn finish(&mut self, elapsed: Duration) {
        self.total_duration = elapsed;
        self.precision = if self.records.is_empty() {
            0.0
        } else {
            self.records.iter().map(|r| r.precision).sum::<f32>() / self.records.len() as f32
        };
    }
}

#[derive(Debug, Clone, Error)]
pub enum ChainError {
    /// A Strict chain hit a raised fault. Records collected so far are kept.
    #[error("event '{event}' threw: {source}")]
    Aborted {
        event: &'static str,
        source: EventError,
        partial: Box<ChainResult>,
    },

    #[error("middleware '{middleware}' failed: {reason}")]
    Middleware {
        middleware: &'static str,
        reason: String,
    },
}

impl ChainError {
    /// Result collected before the abort, if any.
    pub fn partial(&self) -> Option<&ChainResult> {
        match self {
            ChainError::Aborted { partial, .. } => Some(partial),
            ChainError::Middleware { .. } => None,
        }
    }
}

/// Ordered list of events plus the middlewares wrapping them.
///
/// Built once and shared; [`execute`](Self::execute) only needs `&self`.
pub struct EventChain<C> {
    mode: ChainMode,
    events: Vec<Box<dyn Event<C>>>,
    middlewares: Vec<Box<dyn Middleware<C>>>,
}

impl<C: EventContext> EventChain<C> {
    pub fn new(mode: ChainMode) -> Self {
        Self {
            mode,
            events: Vec::new(),
            middlewares: Vec::new(),
        }
    }

    pub fn strict() -> Self {
        Self::new(ChainMode::Strict)
    }

    pub fn lenient() -> Self {
        Self::new(ChainMode::Lenient)
    }

    pub fn with_event<E: Event<C> + 'static>(mut self, event: E) -> Self {
        self.events.push(Box::new(event));
        self
    }

    pub fn with_middleware<M: Middleware<C> + 'static>(mut self, middleware: M) -> Self {
        self.middlewares.push(Box::new(middleware));
        self
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn event_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.events.iter().map(|e| e.name())
    }

    /// Runs every middleware and event once against `ctx`.
    ///
    /// The returned verdict always comes from the event stage; middleware
    /// results only surface when the stage never ran or a middleware faulted.
    pub fn execute(&self, ctx: &mut C) -> StageResult {
        let mut verdict: Option<StageResult> = None;

        let wrapped = {
            let mut stage = |ctx: &mut C| {
                let result = self.run_events(ctx);
                verdict = Some(result.clone());
                result
            };
            Next::new(&self.middlewares, &mut stage).run(ctx)
        };

        match (verdict, wrapped) {
            (Some(Err(aborted)), _) => Err(aborted),
            (Some(Ok(_)), Err(err)) | (None, Err(err)) => {
                error!("Chain execution failed: {}", err);
                ctx.push_error(err.to_string());
                Err(err)
            }
            (Some(Ok(result)), Ok(_)) => Ok(result),
            (None, Ok(result)) => Ok(result),
        }
    }

    fn run_events(&self, ctx: &mut C) -> StageResult {
        let started = Instant::now();
        let mut result = ChainResult::default();

        for event in &self.events {
            let name = event.name();
            let event_started = Instant::now();
            let outcome = event.execute(ctx);
            let duration = event_started.elapsed();

            match outcome {
                Ok(outcome) => {
                    let message = outcome.message.clone();
                    result.records.push(EventRecord {
                        event: name,
                        success: outcome.success,
                        precision: npc_core::clamp_unit(outcome.precision),
                        duration,
                        message: message.clone(),
                    });

                    if outcome.success {
                        continue;
                    }

                    let message = message.unwrap_or_else(|| "no reason given".to_owned());
                    ctx.push_error(format!("{name}: {message}"));

                    match self.mode {
                        ChainMode::Lenient => {
                            warn!("Event '{}' failed (lenient mode): {}", name, message);
                        }
                        ChainMode::Strict => {
                            result.success = false;
                            result.failure_reason =
                                Some(format!("Event '{name}' failed: {message}"));
                            break;
                        }
                    }
                }
                Err(fault) => {
                    result.records.push(EventRecord {
                        event: name,
                        success: false,
                        precision: 0.0,
                        duration,
                        message: Some(fault.to_string()),
                    });
                    ctx.push_error(format!("{name}: {fault}"));

                    match self.mode {
                        ChainMode::Lenient => {
                            error!("Event '{}' threw (lenient mode): {}", name, fault);
                        }
                        ChainMode::Strict => {
                            result.success = false;
                            result.failure_reason = Some(format!("Event '{name}' threw: {fault}"));
                            result.finish(started.elapsed());
                            return Err(ChainError::Aborted {
                                event: name,
                                source: fault,
                                partial: Box::new(result),
                            });
                        }
                    }
                }
            }
        }

        result.finish(started.elapsed());
        Ok(result)
    }
}
