//! The node trait every tree is built from.
//!
//! A [`Behavior`] is ticked against a caller-owned context `C` (the
//! blackboard). Trees are re-evaluated from the root on every tick, so nodes
//! keep no per-tick state of their own; anything that must persist between
//! ticks belongs in the context.

use crate::Status;

pub trait Behavior<C>: Send + Sync {
    /// Label shown in trace logs.
    fn name(&self) -> &str;

    /// Runs the node once against `ctx`.
    ///
    /// Leaves read the agent through `ctx` and may record outputs on it, such
    /// as emitted actions.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Lets `Box<dyn Behavior<C>>` sit wherever a node is expected.
impl<C, B> Behavior<C> for Box<B>
where
    B: Behavior<C> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
