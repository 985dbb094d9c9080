//! Leaf behavior nodes built from closures.
//!
//! [`Action`] performs an effect and reports its own status; [`Condition`]
//! wraps a read-only predicate. Both are named so traces can point at the
//! exact leaf that decided a branch.

use std::fmt;

use crate::{Behavior, Status};

type ActionFn<C> = Box<dyn Fn(&mut C) -> Status + Send + Sync>;
type PredicateFn<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// Runs an effect against the context and returns whatever status it reports.
pub struct Action<C> {
    name: String,
    effect: ActionFn<C>,
}

impl<C> Action<C> {
    pub fn new<F>(name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&mut C) -> Status + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            effect: Box::new(effect),
        }
    }
}

impl<C> Behavior<C> for Action<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&self, ctx: &mut C) -> Status {
        (self.effect)(ctx)
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

/// Succeeds iff the predicate holds. Never mutates the context.
pub struct Condition<C> {
    name: String,
    predicate: PredicateFn<C>,
}

impl<C> Condition<C> {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(&*ctx))
    }
}

impl<C> fmt::Debug for Condition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    #[test]
    fn action_reports_effect_status() {
        let action = Action::new("bump", |ctx: &mut TestContext| {
            ctx.value += 1;
            Status::Running
        });

        let mut ctx = TestContext { value: 0 };
        assert_eq!(action.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 1);
        assert_eq!(action.name(), "bump");
    }

    #[test]
    fn condition_maps_predicate() {
        let positive = Condition::new("positive", |ctx: &TestContext| ctx.value > 0);

        assert_eq!(positive.tick(&mut TestContext { value: 3 }), Status::Success);
        assert_eq!(positive.tick(&mut TestContext { value: -3 }), Status::Failure);
    }
}
