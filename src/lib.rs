//! Lazy Algebra - deferred functor/applicative/alternative/monad expressions
//!
//! This crate provides:
//! - Memoizing suspension cells that unwrap chained suspensions
//! - Capability tiers (Functor ⊂ Applicative ⊂ {Alternative, Monad}) with
//!   explicit per-type witness tables
//! - Builders for deferred combinator expressions, including the mutually
//!   recursive `some`/`many` repetitions
//! - A structural-recursion interpreter that reduces expressions lazily
//! - Concrete `Maybe`, `Parser` and `Labeled` instances and law checkers
//!
//! Evaluation is single-threaded and synchronous.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Capability traits and witness tables
pub mod capability;
/// Scenario runner configuration
pub mod config;
/// Named end-to-end scenarios
pub mod demo;
/// Error types
pub mod error;
/// Concrete capability implementations
pub mod instances;
/// Expression trees, builders and the interpreter
pub mod interpreter;
/// Law-checking helpers
pub mod laws;
/// Memoizing suspension cells
pub mod suspension;
/// Dynamic element values
pub mod value;

// Re-export key types for convenience
pub use capability::{Alternative, Applicative, Functor, Instance, Kleisli, Monad, Witness};
pub use error::{EvalError, Result};
pub use interpreter::{Expr, NodeKind, evaluate, interpret};
pub use suspension::{Step, Suspension};
pub use value::{Function, Value};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
