//! Error types for lazy-algebra
//!
//! Interpretation failures use a single `EvalError` enum; configuration I/O has
//! its own enum so callers of the engine never see file-system errors.

use std::io;
use thiserror::Error;

use crate::interpreter::NodeKind;

/// Errors raised while forcing suspensions or interpreting expressions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The concrete type does not implement the operation a node needs
    #[error(
        "missing capability: {instance} does not provide `{operation}` (needed by {node} node)"
    )]
    MissingCapability {
        /// Name of the concrete instance type
        instance: &'static str,
        /// Operation that was requested
        operation: &'static str,
        /// Node kind that requested it
        node: NodeKind,
    },

    /// An element value had the wrong shape
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Shape the caller required
        expected: &'static str,
        /// Rendering of the value actually supplied
        found: String,
    },

    /// A suspension was forced from inside its own producer
    #[error("suspension forced while it was already being forced")]
    Reentrant,

    /// A user-supplied element function failed
    #[error("function `{name}` failed: {message}")]
    Function {
        /// Function name
        name: String,
        /// Failure description
        message: String,
    },

    /// A law-checking helper found the two sides unequal
    #[error("{law} law violated: {left} != {right}")]
    LawViolated {
        /// Law name
        law: &'static str,
        /// Rendering of the left-hand side
        left: String,
        /// Rendering of the right-hand side
        right: String,
    },
}

impl EvalError {
    /// Build a type mismatch from anything displayable.
    pub fn mismatch(expected: &'static str, found: impl std::fmt::Display) -> Self {
        EvalError::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }

    /// Build a function failure.
    pub fn function(name: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Function {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Convenience result alias for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed configuration file
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
