//! Interpreter end-to-end tests
//!
//! Covers the reference scenarios over `Maybe` and `Parser`, the laziness
//! guarantees of `apply`/`choose_first`, `bind`, and the derived combinators.

use std::cell::Cell;
use std::rc::Rc;

use lazy_algebra::capability::{Alternative, Applicative, Functor, Instance, Witness};
use lazy_algebra::demo::{add, combine_digits};
use lazy_algebra::instances::{Maybe, Parser};
use lazy_algebra::interpreter::builder::{
    apply, bind, choose_first, empty, kleisli, leaf, lift_binary, many, map, pure, replace,
    sequence_discard_first, sequence_discard_second, some, then, unit, void,
};
use lazy_algebra::interpreter::{Continuation, Expr, evaluate, interpret};
use lazy_algebra::{EvalError, Function, Suspension, Value};

fn plus(n: i64) -> Function {
    Function::new(format!("plus {n}"), move |x| Ok(Value::Integer(x.as_integer()? + n)))
}

fn counted<F: Instance>(counter: &Rc<Cell<u32>>, expr: Expr<F>) -> Suspension<Expr<F>> {
    let counter = Rc::clone(counter);
    Suspension::new(move || {
        counter.set(counter.get() + 1);
        Ok(expr.clone())
    })
}

#[test]
fn map_over_pure() {
    let result = interpret(map(pure(Maybe::witness(), 10), plus(5))).force().unwrap();
    assert_eq!(result, Maybe::just(15));
}

#[test]
fn curried_add_through_two_applies() {
    let expr = apply(
        apply(pure(Maybe::witness(), add()), leaf(Maybe::just(10))),
        leaf(Maybe::just(11)),
    );
    assert_eq!(interpret(expr).force().unwrap(), Maybe::just(21));
}

#[test]
fn many_of_empty_is_just_empty_list() {
    let result = evaluate(many(Maybe::witness(), empty(Maybe::witness()))).unwrap();
    assert_eq!(result, Maybe::Just(Value::List(Vec::new())));
}

#[test]
fn some_of_empty_is_nothing() {
    let result = evaluate(some(Maybe::witness(), empty(Maybe::witness()))).unwrap();
    assert_eq!(result, Maybe::Nothing);
}

#[test]
fn choose_first_falls_back_from_empty() {
    let expr = choose_first(empty(Maybe::witness()), pure(Maybe::witness(), 99));
    let result = evaluate(expr).unwrap();
    assert_eq!(result, Maybe::just(99));
}

#[test]
fn parser_combines_two_digits() {
    let expr = apply(
        apply(pure(Parser::witness(), combine_digits()), leaf(Parser::digit())),
        leaf(Parser::digit()),
    );
    let parser = interpret(expr).force().unwrap();
    assert_eq!(
        parser.run("42xyz").unwrap(),
        vec![(Value::Integer(42), "xyz".to_string())]
    );
    assert!(parser.run("4xyz").unwrap().is_empty());
}

#[test]
fn choose_first_never_forces_fallback_after_success() {
    let forced = Rc::new(Cell::new(0));
    let expr = Expr::ChooseFirst {
        primary: Suspension::ready(pure(Maybe::witness(), 1)),
        fallback: counted(&forced, pure(Maybe::witness(), 2)),
    };
    assert_eq!(evaluate(expr).unwrap(), Maybe::just(1));
    assert_eq!(forced.get(), 0);
}

#[test]
fn apply_never_forces_argument_after_failed_function() {
    let forced = Rc::new(Cell::new(0));
    let expr = Expr::Apply {
        function: Suspension::ready(empty(Maybe::witness())),
        argument: counted(&forced, pure(Maybe::witness(), 2)),
    };
    assert_eq!(evaluate(expr).unwrap(), Maybe::Nothing);
    assert_eq!(forced.get(), 0);
}

#[test]
fn interpreted_result_is_memoized() {
    let forced = Rc::new(Cell::new(0));
    let expr = Expr::Map {
        function: plus(1),
        source: counted(&forced, pure(Maybe::witness(), 1)),
    };
    let result = interpret(expr);
    assert_eq!(forced.get(), 0);
    assert_eq!(result.force().unwrap(), Maybe::just(2));
    assert_eq!(result.force().unwrap(), Maybe::just(2));
    assert_eq!(forced.get(), 1);
}

#[test]
fn many_of_empty_interprets_the_action_once() {
    let forced = Rc::new(Cell::new(0));
    let expr = Expr::Repeat0 {
        witness: Maybe::witness(),
        action: counted(&forced, empty(Maybe::witness())),
    };
    assert_eq!(evaluate(expr).unwrap(), Maybe::Just(Value::List(Vec::new())));
    assert_eq!(forced.get(), 1);
}

#[test]
fn bind_feeds_element_into_continuation() {
    let expr = bind(pure(Maybe::witness(), 3), |x| {
        Ok(pure(Maybe::witness(), x.as_integer()? * 2))
    });
    assert_eq!(evaluate(expr).unwrap(), Maybe::just(6));
}

#[test]
fn bind_on_nothing_skips_continuation() {
    let called = Rc::new(Cell::new(false));
    let flag = Rc::clone(&called);
    let expr = bind(empty(Maybe::witness()), move |x| {
        flag.set(true);
        Ok(pure(Maybe::witness(), x))
    });
    assert_eq!(evaluate(expr).unwrap(), Maybe::Nothing);
    assert!(!called.get());
}

#[test]
fn bind_chooses_next_parser_from_parsed_value() {
    // The second parser depends on the first parsed character.
    let expr = bind(leaf(Parser::digit()), |d| {
        let next = if d.as_char()? == '1' {
            leaf(Parser::literal('a'))
        } else {
            leaf(Parser::literal('b'))
        };
        Ok(next)
    });
    let parser = evaluate(expr).unwrap();
    assert_eq!(parser.run("1a!").unwrap(), vec![(Value::Char('a'), "!".to_string())]);
    assert_eq!(parser.run("2b").unwrap(), vec![(Value::Char('b'), String::new())]);
    assert!(parser.run("1b").unwrap().is_empty());
}

#[test]
fn then_and_kleisli_sequence_monadically() {
    let expr = then(leaf(Maybe::just(1)), unit(Maybe::witness(), 2));
    assert_eq!(evaluate(expr).unwrap(), Maybe::just(2));

    let halve = Continuation::new(|x: Value| {
        let n = x.as_integer()?;
        Ok(if n % 2 == 0 {
            pure(Maybe::witness(), n / 2)
        } else {
            empty(Maybe::witness())
        })
    });
    let quarter = kleisli(halve.clone(), halve);
    assert_eq!(evaluate(quarter.call(Value::from(12)).unwrap()).unwrap(), Maybe::just(3));
    assert_eq!(evaluate(quarter.call(Value::from(6)).unwrap()).unwrap(), Maybe::Nothing);
}

#[test]
fn derived_sequencing_keeps_the_right_side() {
    let first = || leaf(Maybe::just(1));
    let second = || leaf(Maybe::just(2));
    assert_eq!(evaluate(sequence_discard_first(first(), second())).unwrap(), Maybe::just(2));
    assert_eq!(evaluate(sequence_discard_second(first(), second())).unwrap(), Maybe::just(1));
    assert_eq!(
        evaluate(sequence_discard_first(empty(Maybe::witness()), second())).unwrap(),
        Maybe::Nothing
    );
}

#[test]
fn derived_sequencing_consumes_parser_input_in_order() {
    let expr = sequence_discard_second(leaf(Parser::digit()), leaf(Parser::literal(';')));
    let parser = evaluate(expr).unwrap();
    assert_eq!(parser.run("7;x").unwrap(), vec![(Value::Char('7'), "x".to_string())]);
}

#[test]
fn lift_binary_and_replace() {
    let expr = lift_binary(
        |xs, n| Ok(Value::Integer(xs.as_list()?.len() as i64 + n.as_integer()?)),
        many(Maybe::witness(), empty(Maybe::witness())),
        pure(Maybe::witness(), 10),
    );
    assert_eq!(evaluate(expr).unwrap(), Maybe::just(10));
    assert_eq!(evaluate(replace('x', leaf(Maybe::just(1)))).unwrap(), Maybe::just('x'));
    assert_eq!(evaluate(void(leaf(Maybe::just(1)))).unwrap(), Maybe::Just(Value::Unit));
}

#[test]
fn element_errors_propagate() {
    let failing = Function::new("boom", |_| Err(EvalError::function("boom", "bad input")));
    let err = evaluate(map(pure(Maybe::witness(), 1), failing)).unwrap_err();
    assert_eq!(err, EvalError::function("boom", "bad input"));

    let not_a_function = apply(pure(Maybe::witness(), 3), leaf(Maybe::just(1)));
    assert!(matches!(
        evaluate(not_a_function),
        Err(EvalError::TypeMismatch { expected: "function", .. })
    ));
}

#[test]
fn parser_choice_uses_fallback_only_for_the_failing_parser() {
    let expr = choose_first(empty(Parser::witness()), leaf(Parser::digit()));
    let parser = evaluate(expr).unwrap();
    assert_eq!(parser.run("9").unwrap(), vec![(Value::Char('9'), String::new())]);
}

#[test]
fn parser_repetition_never_reaches_its_terminator() {
    // Structural choice treats every non-`fail` parser as success, so `many`
    // always commits to `some` and running out of digits fails the whole parse.
    let parser = evaluate(many(Parser::witness(), leaf(Parser::digit()))).unwrap();
    assert!(parser.run("42x").unwrap().is_empty());
    assert!(parser.run("").unwrap().is_empty());
}

/// A counter whose `empty()` is zero, so a genuine zero reads as failure.
#[derive(Debug, Clone, PartialEq)]
struct Tally(Value);

impl Functor for Tally {
    fn fmap(&self, f: &Function) -> lazy_algebra::Result<Self> {
        Ok(Tally(f.call(self.0.clone())?))
    }
}

impl Applicative for Tally {
    fn pure(value: Value) -> Self {
        Tally(value)
    }

    fn ap(&self, argument: &Suspension<Self>) -> lazy_algebra::Result<Self> {
        Ok(Tally(self.0.call(argument.force()?.0)?))
    }
}

impl Alternative for Tally {
    fn empty() -> Self {
        Tally(Value::Integer(0))
    }
}

impl Instance for Tally {
    const NAME: &'static str = "Tally";

    fn witness() -> Witness<Self> {
        Witness::new(Self::NAME).alternative()
    }
}

#[test]
fn value_equal_to_empty_is_treated_as_failure() {
    let expr = choose_first(pure(Tally::witness(), 0), pure(Tally::witness(), 5));
    assert_eq!(evaluate(expr).unwrap(), Tally(Value::Integer(5)));
}
