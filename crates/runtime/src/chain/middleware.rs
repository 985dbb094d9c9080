//! Middleware wrapping the event stage of a chain.

use super::{ChainError, ChainResult};

/// Result of running the (rest of the) pipeline.
pub type StageResult = Result<ChainResult, ChainError>;

/// Decorator around the event stage.
///
/// Before-logic runs in registration order, after-logic in reverse. A
/// middleware observes the stage result but cannot change the chain's
/// verdict: whatever it returns after calling [`Next::run`] is only used if
/// the stage itself never ran.
pub trait Middleware<C>: Send + Sync {
    fn name(&self) -> &'static str;

    fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> StageResult;
}

/// Continuation handed to a [`Middleware`].
pub struct Next<'a, C> {
    middlewares: &'a [Box<dyn Middleware<C>>],
    stage: &'a mut dyn FnMut(&mut C) -> StageResult,
}

impl<'a, C> Next<'a, C> {
    pub(crate) fn new(
        middlewares: &'a [Box<dyn Middleware<C>>],
        stage: &'a mut dyn FnMut(&mut C) -> StageResult,
    ) -> Self {
        Self { middlewares, stage }
    }

    /// Runs the remaining middlewares, then the event stage.
    pub fn run(self, ctx: &mut C) -> StageResult {
        match self.middlewares.split_first() {
            Some((head, rest)) => head.handle(
                ctx,
                Next {
                    middlewares: rest,
                    stage: self.stage,
                },
            ),
            None => (self.stage)(ctx),
        }
    }
}
