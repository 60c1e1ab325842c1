//! Structural-recursion interpreter for [`Expr`] trees.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::capability::{Instance, Kleisli, Witness};
use crate::error::Result;
use crate::suspension::{Step, Suspension};
use crate::value::{Function, Value};

use super::expr::{Expr, NodeKind};

/// Reduce an expression to a suspension of its concrete value.
///
/// Nothing is evaluated until the returned suspension is forced. Forcing an
/// expression that repeats an action which never fails (or never consumes
/// input) does not return; the engine does not bound or detect this.
pub fn interpret<F: Instance>(expr: Expr<F>) -> Suspension<F> {
    Suspension::from_step(move || step(&expr))
}

/// Interpret and force in one call.
pub fn evaluate<F: Instance>(expr: Expr<F>) -> Result<F> {
    interpret(expr).force()
}

fn step<F: Instance>(expr: &Expr<F>) -> Result<Step<F>> {
    let kind = expr.kind();
    trace!(node = %kind, instance = F::NAME, "interpreting node");

    match expr {
        Expr::Map { function, source } => {
            let value = force_operand(source)?;
            F::witness().fmap(&value, function, kind).map(Step::Value)
        }
        Expr::Pure { witness, value } => witness.pure(value.force()?, kind).map(Step::Value),
        Expr::Apply { function, argument } => {
            // Only the function side is forced here; `ap` owns the decision to
            // force the argument.
            let function = force_operand(function)?;
            let argument = interpret_operand(argument.clone());
            F::witness().ap(&function, &argument, kind).map(Step::Value)
        }
        Expr::Empty { witness } => witness.empty(kind).map(Step::Value),
        Expr::ChooseFirst { primary, fallback } => {
            let primary = force_operand(primary)?;
            let fallback = interpret_operand(fallback.clone());
            let chosen = F::witness().choose_first(primary, fallback, kind)?;
            if matches!(chosen, Step::Suspended(_)) {
                debug!(instance = F::NAME, "primary alternative is empty, using fallback");
            }
            Ok(chosen)
        }
        Expr::Repeat0 { witness, action } => {
            debug!(instance = witness.name(), "unfolding many");
            Ok(Step::Suspended(interpret(unfold_many(*witness, action.clone()))))
        }
        Expr::Repeat1 { witness, action } => {
            debug!(instance = witness.name(), "unfolding some");
            Ok(Step::Suspended(interpret(unfold_some(*witness, action.clone()))))
        }
        Expr::Bind { source, continuation } => {
            let source = force_operand(source)?;
            let continuation = continuation.force()?;
            let k: Kleisli<F> = Rc::new(move |element: Value| -> Result<F> {
                evaluate(continuation.call(element)?)
            });
            F::witness().bind(&source, &k, kind).map(Step::Value)
        }
        Expr::Leaf(value) => Ok(Step::Value(value.clone())),
    }
}

fn force_operand<F: Instance>(operand: &Suspension<Expr<F>>) -> Result<F> {
    interpret(operand.force()?).force()
}

fn interpret_operand<F: Instance>(operand: Suspension<Expr<F>>) -> Suspension<F> {
    Suspension::defer(move || Ok(interpret(operand.force()?)))
}

/// `many v = some v <|> pure []`
fn unfold_many<F: Instance>(witness: Witness<F>, action: Suspension<Expr<F>>) -> Expr<F> {
    let some = Suspension::new(move || {
        Ok(Expr::Repeat1 {
            witness,
            action: action.clone(),
        })
    });
    let done = Suspension::ready(Expr::Pure {
        witness,
        value: Suspension::ready(Value::List(Vec::new())),
    });
    Expr::ChooseFirst {
        primary: some,
        fallback: done,
    }
}

/// `some v = (cons <$> v) <*> many v`
fn unfold_some<F: Instance>(witness: Witness<F>, action: Suspension<Expr<F>>) -> Expr<F> {
    let head = {
        let action = action.clone();
        Suspension::new(move || {
            Ok(Expr::Map {
                function: cons(),
                source: action.clone(),
            })
        })
    };
    let tail = Suspension::new(move || {
        Ok(Expr::Repeat0 {
            witness,
            action: action.clone(),
        })
    });
    Expr::Apply {
        function: head,
        argument: tail,
    }
}

fn cons() -> Function {
    Function::curried("cons", |head, tail| {
        let mut items = Vec::with_capacity(tail.as_list()?.len() + 1);
        items.push(head);
        items.extend(tail.as_list()?.iter().cloned());
        Ok(Value::List(items))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::Maybe;
    use crate::interpreter::builder::{choose_first, empty, leaf, pure};

    #[test]
    fn interpret_is_lazy_until_forced() {
        let result = interpret(pure(Maybe::witness(), 3));
        assert!(!result.is_forced());
        assert_eq!(result.force().unwrap(), Maybe::just(3));
        assert!(result.is_forced());
    }

    #[test]
    fn choose_first_keeps_non_empty_primary() {
        let expr = choose_first(leaf(Maybe::just(1)), empty(Maybe::witness()));
        assert_eq!(evaluate(expr).unwrap(), Maybe::just(1));
    }

    #[test]
    fn cons_prepends_to_list() {
        let list = cons()
            .call(Value::from(1))
            .and_then(|partial| partial.call(Value::List(vec![Value::from(2)])))
            .unwrap();
        assert_eq!(list, Value::List(vec![Value::from(1), Value::from(2)]));
    }
}
