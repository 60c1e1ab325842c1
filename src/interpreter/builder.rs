//! Builders for deferred expressions.
//!
//! Nothing here forces or interprets anything; each builder only allocates a
//! node whose operands are suspensions.

use crate::capability::{Instance, Witness};
use crate::error::Result;
use crate::suspension::Suspension;
use crate::value::{Function, Value};

use super::expr::{Continuation, Expr};

fn operand<F: Instance>(expr: Expr<F>) -> Suspension<Expr<F>> {
    Suspension::ready(expr)
}

/// Already-evaluated terminal.
pub fn leaf<F: Instance>(value: F) -> Expr<F> {
    Expr::Leaf(value)
}

/// Deferred `source.fmap(function)`.
pub fn map<F: Instance>(source: Expr<F>, function: Function) -> Expr<F> {
    Expr::Map {
        function,
        source: operand(source),
    }
}

/// Deferred `F::pure(value)`.
pub fn pure<F: Instance>(witness: Witness<F>, value: impl Into<Value>) -> Expr<F> {
    Expr::Pure {
        witness,
        value: Suspension::ready(value.into()),
    }
}

/// Sequenceable spelling of [`pure`].
pub fn unit<F: Instance>(witness: Witness<F>, value: impl Into<Value>) -> Expr<F> {
    pure(witness, value)
}

/// Deferred `function.ap(argument)`.
pub fn apply<F: Instance>(function: Expr<F>, argument: Expr<F>) -> Expr<F> {
    Expr::Apply {
        function: operand(function),
        argument: operand(argument),
    }
}

/// Deferred `F::empty()`.
pub fn empty<F: Instance>(witness: Witness<F>) -> Expr<F> {
    Expr::Empty { witness }
}

/// Deferred first-success choice between `primary` and `fallback`.
pub fn choose_first<F: Instance>(primary: Expr<F>, fallback: Expr<F>) -> Expr<F> {
    Expr::ChooseFirst {
        primary: operand(primary),
        fallback: operand(fallback),
    }
}

/// One or more repetitions of `action`, collected into a list.
///
/// Terminates only if `action` eventually becomes empty and the instance's `ap`
/// does not force its argument after a failed function side. An action that
/// always succeeds without making progress loops forever.
pub fn some<F: Instance>(witness: Witness<F>, action: Expr<F>) -> Expr<F> {
    Expr::Repeat1 {
        witness,
        action: operand(action),
    }
}

/// Zero or more repetitions of `action`, collected into a list.
///
/// Same termination obligations as [`some`].
pub fn many<F: Instance>(witness: Witness<F>, action: Expr<F>) -> Expr<F> {
    Expr::Repeat0 {
        witness,
        action: operand(action),
    }
}

/// Deferred `source.bind(continuation)`.
pub fn bind<F: Instance>(
    source: Expr<F>,
    continuation: impl Fn(Value) -> Result<Expr<F>> + 'static,
) -> Expr<F> {
    Expr::Bind {
        source: operand(source),
        continuation: Suspension::ready(Continuation::new(continuation)),
    }
}

/// `first >>= |_| second`
pub fn then<F: Instance>(first: Expr<F>, second: Expr<F>) -> Expr<F> {
    bind(first, move |_| Ok(second.clone()))
}

/// Kleisli composition: `|a| f(a) >>= g`.
pub fn kleisli<F: Instance>(f: Continuation<F>, g: Continuation<F>) -> Continuation<F> {
    Continuation::new(move |a| {
        let g = g.clone();
        Ok(bind(f.call(a)?, move |b| g.call(b)))
    })
}

/// Lift a two-argument function over two expressions.
pub fn lift_binary<F: Instance>(
    function: impl Fn(Value, Value) -> Result<Value> + 'static,
    first: Expr<F>,
    second: Expr<F>,
) -> Expr<F> {
    apply(map(first, Function::curried("lift_binary", function)), second)
}

/// Run both, keep the second result (`*>`).
pub fn sequence_discard_first<F: Instance>(first: Expr<F>, second: Expr<F>) -> Expr<F> {
    lift_binary(|_, b| Ok(b), first, second)
}

/// Run both, keep the first result (`<*`).
pub fn sequence_discard_second<F: Instance>(first: Expr<F>, second: Expr<F>) -> Expr<F> {
    lift_binary(|a, _| Ok(a), first, second)
}

/// Replace every element with `value` (`<$`).
pub fn replace<F: Instance>(value: impl Into<Value>, source: Expr<F>) -> Expr<F> {
    map(source, Function::constant(value.into()))
}

/// Replace every element with unit.
pub fn void<F: Instance>(source: Expr<F>) -> Expr<F> {
    replace(Value::Unit, source)
}
