//! Deferred expressions and their interpreter.
//!
//! Callers combine [`builder`] functions into an [`Expr`] tree (no work happens),
//! then hand the root to [`interpret`]. The interpreter walks the tree depth
//! first, delegating `map`/`pure`/`apply`/`empty`/`choose_first`/`bind` to the
//! concrete instance type, and returns a [`Suspension`](crate::Suspension) that
//! yields the result once forced.

/// Builders that construct expression nodes without evaluating them.
pub mod builder;
/// Structural-recursion evaluator.
pub mod eval;
/// Expression tree node definitions.
pub mod expr;

pub use eval::{evaluate, interpret};
pub use expr::{Continuation, Expr, NodeKind};
