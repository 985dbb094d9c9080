//! Event contract and the context capability it runs against.

use std::collections::BTreeMap;

use npc_core::clamp_unit;
use thiserror::Error;

/// Named float measurements shared between events of one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    values: BTreeMap<String, f32>,
}

impl Metrics {
    pub fn set(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_owned(), value);
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    pub fn get_or(&self, key: &str, default: f32) -> f32 {
        self.get(key).unwrap_or(default)
    }

    /// Like [`get`](Self::get) but a missing key is a fault.
    pub fn require(&self, key: &'static str) -> Result<f32, EventError> {
        self.get(key).ok_or(EventError::MissingMetric(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Capabilities a context must offer to be driven by an
/// [`EventChain`](super::EventChain).
pub trait EventContext {
    fn metrics(&self) -> &Metrics;
    fn metrics_mut(&mut self) -> &mut Metrics;
    fn errors(&self) -> &[String];
    fn push_error(&mut self, message: String);
}

/// What an event reports when it ran to completion.
///
/// `success == false` is an *expected* failure; raised faults use
/// [`EventError`] instead.
#[derive(Clone, Debug, PartialEq)]
pub struct EventOutcome {
    pub success: bool,
    pub precision: f32,
    pub message: Option<String>,
}

impl EventOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            precision: 1.0,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            precision: 0.0,
            message: Some(message.into()),
        }
    }

    /// Clamped into `[0, 1]`.
    pub fn with_precision(mut self, precision: f32) -> Self {
        self.precision = clamp_unit(precision);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A raised fault: the event could not run to completion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("required metric `{0}` is missing")]
    MissingMetric(&'static str),

    #[error("{0}")]
    Fault(String),
}

/// One step of a chain.
pub trait Event<C>: Send + Sync {
    /// Returns a human-readable name (used in records and logs).
    fn name(&self) -> &'static str;

    fn execute(&self, ctx: &mut C) -> Result<EventOutcome, EventError>;
}
