//! Capability tiers and the witness table that binds them to a concrete type.
//!
//! The tiers are layered `Functor ⊂ Applicative ⊂ {Alternative, Monad}`. A
//! concrete type implements whichever traits it supports and then declares the
//! same set in its [`Witness`]; the interpreter only ever calls operations
//! through the witness, so a node that needs an undeclared operation fails with
//! [`EvalError::MissingCapability`] instead of being rejected up front.

use std::fmt;
use std::rc::Rc;

use crate::error::{EvalError, Result};
use crate::interpreter::NodeKind;
use crate::suspension::{Step, Suspension};
use crate::value::{Function, Value};

/// Continuation handed to [`Monad::bind`].
pub type Kleisli<F> = Rc<dyn Fn(Value) -> Result<F>>;

/// Mappable computations.
///
/// Laws: `fa.fmap(id) == fa` and `fa.fmap(g . f) == fa.fmap(f).fmap(g)`.
pub trait Functor: Sized {
    /// Apply `f` to every contained element, preserving shape.
    fn fmap(&self, f: &Function) -> Result<Self>;
}

/// Applicable computations.
///
/// Laws: identity, homomorphism, interchange and composition.
pub trait Applicative: Functor {
    /// Wrap a raw value.
    fn pure(value: Value) -> Self;

    /// Apply the wrapped function in `self` to the wrapped argument.
    ///
    /// The argument arrives unforced. Implementations must not force it when
    /// `self` has already failed; repetition relies on this to terminate.
    fn ap(&self, argument: &Suspension<Self>) -> Result<Self>;
}

/// Computations with failure and first-success choice.
///
/// Laws: `empty` is a left and right identity for `choose_first`, which is
/// associative; `ap` distributes over it and `empty` annihilates under `ap`.
pub trait Alternative: Applicative + PartialEq + Clone + 'static {
    /// The canonical failed value.
    fn empty() -> Self;

    /// Whether `self` is structurally equal to [`Alternative::empty`].
    ///
    /// This is the only hook choice consults; see [`choose_first`]. A
    /// legitimately produced value equal to `empty()` is indistinguishable
    /// from failure.
    fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

/// `primary <|> fallback`: `primary` unless it is empty, otherwise the forced
/// fallback.
///
/// The interpreter's `choose_first` node makes the same decision through
/// [`Witness::choose_first`].
pub fn choose_first<F: Alternative>(primary: &F, fallback: &Suspension<F>) -> Result<F> {
    match select(primary.clone(), fallback.clone(), <F as Alternative>::is_empty) {
        Step::Value(value) => Ok(value),
        Step::Suspended(fallback) => fallback.force(),
    }
}

fn select<F>(primary: F, fallback: Suspension<F>, is_empty: fn(&F) -> bool) -> Step<F> {
    if is_empty(&primary) {
        Step::Suspended(fallback)
    } else {
        Step::Value(primary)
    }
}

/// Sequenceable computations.
///
/// Laws: `pure(a).bind(k) == k(a)`, `m.bind(pure) == m`, and
/// `m.bind(f).bind(g) == m.bind(|x| f(x).bind(g))`.
pub trait Monad: Applicative {
    /// Feed each element into `k` and flatten one level of wrapping.
    fn bind(&self, k: &Kleisli<Self>) -> Result<Self>;

    /// Same as [`Applicative::pure`].
    fn unit(value: Value) -> Self {
        Self::pure(value)
    }
}

/// A concrete type that can be interpreted.
pub trait Instance: Clone + fmt::Debug + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// The capabilities this type declares.
    fn witness() -> Witness<Self>;
}

/// Capability table for one concrete type.
pub struct Witness<F> {
    name: &'static str,
    fmap: Option<fn(&F, &Function) -> Result<F>>,
    pure: Option<fn(Value) -> F>,
    ap: Option<fn(&F, &Suspension<F>) -> Result<F>>,
    empty: Option<fn() -> F>,
    is_empty: Option<fn(&F) -> bool>,
    bind: Option<fn(&F, &Kleisli<F>) -> Result<F>>,
}

impl<F> Clone for Witness<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Witness<F> {}

impl<F> fmt::Debug for Witness<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Witness({})", self.name)
    }
}

impl<F> Witness<F> {
    /// A table declaring no capabilities.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fmap: None,
            pure: None,
            ap: None,
            empty: None,
            is_empty: None,
            bind: None,
        }
    }

    /// Instance name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declare the Mappable tier.
    pub fn functor(mut self) -> Self
    where
        F: Functor,
    {
        self.fmap = Some(<F as Functor>::fmap);
        self
    }

    /// Declare the Applicable tier (and Mappable).
    pub fn applicative(mut self) -> Self
    where
        F: Applicative,
    {
        self.pure = Some(<F as Applicative>::pure);
        self.ap = Some(<F as Applicative>::ap);
        self.functor()
    }

    /// Declare the Choosable tier (and Applicable).
    pub fn alternative(mut self) -> Self
    where
        F: Alternative,
    {
        self.empty = Some(<F as Alternative>::empty);
        self.is_empty = Some(<F as Alternative>::is_empty);
        self.applicative()
    }

    /// Declare the Sequenceable tier (and Applicable).
    pub fn monad(mut self) -> Self
    where
        F: Monad,
    {
        self.bind = Some(<F as Monad>::bind);
        self.applicative()
    }

    /// `value.fmap(f)`
    pub fn fmap(&self, value: &F, f: &Function, node: NodeKind) -> Result<F> {
        let op = self.fmap.ok_or_else(|| self.missing("map", node))?;
        op(value, f)
    }

    /// `F::pure(value)`
    pub fn pure(&self, value: Value, node: NodeKind) -> Result<F> {
        let op = self.pure.ok_or_else(|| self.missing("pure", node))?;
        Ok(op(value))
    }

    /// `function.ap(argument)`
    pub fn ap(&self, function: &F, argument: &Suspension<F>, node: NodeKind) -> Result<F> {
        let op = self.ap.ok_or_else(|| self.missing("apply", node))?;
        op(function, argument)
    }

    /// `F::empty()`
    pub fn empty(&self, node: NodeKind) -> Result<F> {
        let op = self.empty.ok_or_else(|| self.missing("empty", node))?;
        Ok(op())
    }

    /// First-success choice: `primary` unless it equals `empty()`, in which
    /// case the (still unforced) fallback.
    pub fn choose_first(
        &self,
        primary: F,
        fallback: Suspension<F>,
        node: NodeKind,
    ) -> Result<Step<F>> {
        let is_empty = self.is_empty.ok_or_else(|| self.missing("choose_first", node))?;
        Ok(select(primary, fallback, is_empty))
    }

    /// `value.bind(k)`
    pub fn bind(&self, value: &F, k: &Kleisli<F>, node: NodeKind) -> Result<F> {
        let op = self.bind.ok_or_else(|| self.missing("bind", node))?;
        op(value, k)
    }

    fn missing(&self, operation: &'static str, node: NodeKind) -> EvalError {
        EvalError::MissingCapability {
            instance: self.name,
            operation,
            node,
        }
    }
}
