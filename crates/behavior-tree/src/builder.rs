//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Box::new(Sequence::new("name", vec![...]))`, you can use shorter functions
//! like `sequence("name", vec![...])`.

use crate::{Action, AlwaysFail, AlwaysSucceed, Behavior, Condition, Selector, Sequence, Status};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(name, children))`.
#[inline]
pub fn sequence<C: 'static>(
    name: impl Into<String>,
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(name, children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(name, children))`.
#[inline]
pub fn selector<C: 'static>(
    name: impl Into<String>,
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(name, children))
}

/// Creates an action leaf.
#[inline]
pub fn action<C: 'static, F>(name: impl Into<String>, effect: F) -> Box<dyn Behavior<C>>
where
    F: Fn(&mut C) -> Status + Send + Sync + 'static,
{
    Box::new(Action::new(name, effect))
}

/// Creates a condition leaf.
#[inline]
pub fn condition<C: 'static, F>(name: impl Into<String>, predicate: F) -> Box<dyn Behavior<C>>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Box::new(Condition::new(name, predicate))
}

/// Creates an always-succeed node.
///
/// Shorthand for `Box::new(AlwaysSucceed::new(child))`.
#[inline]
pub fn always_succeed<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}

/// Creates an always-fail node.
#[inline]
pub fn always_fail<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysFail::new(child))
}
