//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating priority
//! trees: [`Sequence`] (AND logic) and [`Selector`] (OR logic).

use crate::{Behavior, Status};

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops immediately**
///   and returns that status
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    name: String,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other, // Short-circuit on Failure or Running
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops immediately**
///   and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation. Children
/// are listed highest priority first.
pub struct Selector<C> {
    name: String,
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Failure => continue,
                other => return other, // Short-circuit on Success or Running
            }
        }
        Status::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every leaf invocation so short-circuiting is observable.
    #[derive(Default)]
    struct TestContext {
        calls: Vec<&'static str>,
    }

    struct Leaf {
        label: &'static str,
        result: Status,
    }

    impl Behavior<TestContext> for Leaf {
        fn name(&self) -> &str {
            self.label
        }

        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.calls.push(self.label);
            self.result
        }
    }

    fn leaf(label: &'static str, result: Status) -> Box<dyn Behavior<TestContext>> {
        Box::new(Leaf { label, result })
    }

    #[test]
    fn sequence_all_success() {
        let seq = Sequence::new(
            "all",
            vec![leaf("a", Status::Success), leaf("b", Status::Success)],
        );

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, ["a", "b"]);
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let seq = Sequence::new(
            "guarded",
            vec![
                leaf("a", Status::Success),
                leaf("b", Status::Failure),
                leaf("c", Status::Success),
            ],
        );

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, ["a", "b"]);
    }

    #[test]
    fn sequence_stops_at_running_child() {
        let seq = Sequence::new(
            "busy",
            vec![leaf("a", Status::Running), leaf("b", Status::Success)],
        );

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.calls, ["a"]);
    }

    #[test]
    fn selector_stops_at_first_success() {
        let sel = Selector::new(
            "first",
            vec![
                leaf("a", Status::Failure),
                leaf("b", Status::Success),
                leaf("c", Status::Success),
            ],
        );

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.calls, ["a", "b"]);
    }

    #[test]
    fn selector_stops_at_running_child() {
        let sel = Selector::new(
            "busy",
            vec![
                leaf("a", Status::Failure),
                leaf("b", Status::Running),
                leaf("c", Status::Success),
            ],
        );

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.calls, ["a", "b"]);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let sel = Selector::new(
            "none",
            vec![leaf("a", Status::Failure), leaf("b", Status::Failure)],
        );

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.calls, ["a", "b"]);
    }

    #[test]
    #[should_panic(expected = "Selector must have at least one child")]
    fn selector_rejects_empty_children() {
        let _ = Selector::<TestContext>::new("empty", Vec::new());
    }
}
