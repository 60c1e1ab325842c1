use std::fmt;
use std::rc::Rc;

use crate::capability::{Instance, Witness};
use crate::error::Result;
use crate::suspension::Suspension;
use crate::value::{Function, Value};

/// Deferred combinator call over the concrete instance type `F`.
///
/// Every operand is a [`Suspension`]; building a tree never interprets any of it.
#[derive(Debug, Clone)]
pub enum Expr<F> {
    /// Deferred `fmap`.
    Map {
        /// Element function.
        function: Function,
        /// Expression being mapped over.
        source: Suspension<Expr<F>>,
    },
    /// Deferred `pure`.
    Pure {
        /// Instance whose `pure` is used.
        witness: Witness<F>,
        /// Raw value to wrap.
        value: Suspension<Value>,
    },
    /// Deferred `ap`.
    Apply {
        /// Expression producing the wrapped function.
        function: Suspension<Expr<F>>,
        /// Expression producing the wrapped argument.
        argument: Suspension<Expr<F>>,
    },
    /// Deferred `empty`.
    Empty {
        /// Instance whose `empty` is used.
        witness: Witness<F>,
    },
    /// Deferred first-success choice.
    ChooseFirst {
        /// Tried first.
        primary: Suspension<Expr<F>>,
        /// Only interpreted when `primary` is empty.
        fallback: Suspension<Expr<F>>,
    },
    /// One or more repetitions (`some`).
    Repeat1 {
        /// Instance providing the `pure([])` terminator.
        witness: Witness<F>,
        /// Action being repeated.
        action: Suspension<Expr<F>>,
    },
    /// Zero or more repetitions (`many`).
    Repeat0 {
        /// Instance providing the `pure([])` terminator.
        witness: Witness<F>,
        /// Action being repeated.
        action: Suspension<Expr<F>>,
    },
    /// Deferred `bind`.
    Bind {
        /// Expression whose elements feed the continuation.
        source: Suspension<Expr<F>>,
        /// Builds the next expression from one element.
        continuation: Suspension<Continuation<F>>,
    },
    /// Already-evaluated terminal.
    Leaf(F),
}

/// Field-less mirror of [`Expr`] used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Expr::Map`]
    Map,
    /// [`Expr::Pure`]
    Pure,
    /// [`Expr::Apply`]
    Apply,
    /// [`Expr::Empty`]
    Empty,
    /// [`Expr::ChooseFirst`]
    ChooseFirst,
    /// [`Expr::Repeat1`]
    Repeat1,
    /// [`Expr::Repeat0`]
    Repeat0,
    /// [`Expr::Bind`]
    Bind,
    /// [`Expr::Leaf`]
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Map => "map",
            NodeKind::Pure => "pure",
            NodeKind::Apply => "apply",
            NodeKind::Empty => "empty",
            NodeKind::ChooseFirst => "choose_first",
            NodeKind::Repeat1 => "some",
            NodeKind::Repeat0 => "many",
            NodeKind::Bind => "bind",
            NodeKind::Leaf => "leaf",
        };
        f.write_str(name)
    }
}

impl<F> Expr<F> {
    /// The variant tag.
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Map { .. } => NodeKind::Map,
            Expr::Pure { .. } => NodeKind::Pure,
            Expr::Apply { .. } => NodeKind::Apply,
            Expr::Empty { .. } => NodeKind::Empty,
            Expr::ChooseFirst { .. } => NodeKind::ChooseFirst,
            Expr::Repeat1 { .. } => NodeKind::Repeat1,
            Expr::Repeat0 { .. } => NodeKind::Repeat0,
            Expr::Bind { .. } => NodeKind::Bind,
            Expr::Leaf(_) => NodeKind::Leaf,
        }
    }
}

impl<F: Instance> Expr<F> {
    /// Shorthand for [`super::interpret`].
    pub fn interpret(self) -> Suspension<F> {
        super::interpret(self)
    }
}

impl<F> From<F> for Expr<F> {
    fn from(value: F) -> Self {
        Expr::Leaf(value)
    }
}

/// Continuation of a [`Expr::Bind`] node: one element in, next expression out.
pub struct Continuation<F> {
    body: Rc<dyn Fn(Value) -> Result<Expr<F>>>,
}

impl<F> Continuation<F> {
    /// Wrap a closure.
    pub fn new(body: impl Fn(Value) -> Result<Expr<F>> + 'static) -> Self {
        Self { body: Rc::new(body) }
    }

    /// Build the next expression.
    pub fn call(&self, value: Value) -> Result<Expr<F>> {
        (self.body)(value)
    }
}

impl<F> Clone for Continuation<F> {
    fn clone(&self) -> Self {
        Self {
            body: Rc::clone(&self.body),
        }
    }
}

impl<F> fmt::Debug for Continuation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<continuation>")
    }
}
