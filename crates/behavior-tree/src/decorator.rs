//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result.
//! This module provides [`AlwaysSucceed`] (failure suppression) and
//! [`AlwaysFail`] (fall-through after side effects).

use crate::{Behavior, Status};

/// Returns `Success` whenever the child finishes, regardless of its result.
///
/// # Semantics
///
/// - If the child returns `Success` or `Failure`, returns `Success`
/// - If the child returns `Running`, returns `Running`
///
/// This is useful for best-effort steps inside a sequence, e.g. "try to reach
/// cover, then reload either way".
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn name(&self) -> &str {
        self.child.name()
    }

    fn tick(&self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Success,
        }
    }
}

/// Returns `Failure` whenever the child finishes, regardless of its result.
///
/// # Semantics
///
/// - If the child returns `Success` or `Failure`, returns `Failure`
/// - If the child returns `Running`, returns `Running`
///
/// Placed under a selector, this lets a branch contribute its side effects
/// while still handing control to the lower-priority branches.
pub struct AlwaysFail<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysFail<C> {
    /// Creates a new always-fail wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysFail<C> {
    fn name(&self) -> &str {
        self.child.name()
    }

    fn tick(&self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            _ => Status::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    struct Report(Status);
    impl Behavior<TestContext> for Report {
        fn name(&self) -> &str {
            "report"
        }

        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            self.0
        }
    }

    #[test]
    fn always_succeed_on_success() {
        let always = AlwaysSucceed::new(Box::new(Report(Status::Success)));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn always_succeed_on_failure() {
        let always = AlwaysSucceed::new(Box::new(Report(Status::Failure)));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1); // Child still executed
    }

    #[test]
    fn always_fail_on_success() {
        let always = AlwaysFail::new(Box::new(Report(Status::Success)));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn decorators_pass_running_through() {
        let mut ctx = TestContext { value: 0 };

        let succeed = AlwaysSucceed::new(Box::new(Report(Status::Running)));
        assert_eq!(succeed.tick(&mut ctx), Status::Running);

        let fail = AlwaysFail::new(Box::new(Report(Status::Running)));
        assert_eq!(fail.tick(&mut ctx), Status::Running);
        assert_eq!(fail.name(), "report");
    }
}
