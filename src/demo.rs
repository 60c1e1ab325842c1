//! Named example scenarios exercising the interpreter end to end.

use tracing::{info, warn};

use crate::capability::Instance;
use crate::config::DemoConfig;
use crate::error::{EvalError, Result};
use crate::instances::{Maybe, Parser};
use crate::interpreter::builder::{
    apply, choose_first, empty, leaf, lift_binary, many, map, pure, some,
};
use crate::interpreter::{Expr, evaluate};
use crate::value::{Function, Value};

/// A runnable scenario.
pub struct Scenario {
    /// Unique name, used for selection.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    run: fn(&DemoConfig) -> Result<Outcome>,
}

struct Outcome {
    rendered: String,
    expected: String,
}

/// Result of running one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: &'static str,
    /// Rendered result (or error).
    pub rendered: String,
    /// Rendered expectation.
    pub expected: String,
    /// Whether the two agree.
    pub passed: bool,
}

/// Every available scenario, in a stable order.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "map-pure",
            description: "map (+5) over pure 10",
            run: map_pure,
        },
        Scenario {
            name: "apply-add",
            description: "pure add <*> Just 10 <*> Just 11",
            run: apply_add,
        },
        Scenario {
            name: "many-empty",
            description: "many over an always-empty action",
            run: many_empty,
        },
        Scenario {
            name: "some-empty",
            description: "some over an always-empty action",
            run: some_empty,
        },
        Scenario {
            name: "choose-fallback",
            description: "empty <|> pure 99",
            run: choose_fallback,
        },
        Scenario {
            name: "lift-many-length",
            description: "lift (length xs + n) over many empty and pure 10",
            run: lift_many_length,
        },
        Scenario {
            name: "parse-two-digits",
            description: "pure combine <*> digit <*> digit on the configured input",
            run: parse_two_digits,
        },
    ]
}

/// Run every scenario selected by `config`.
pub fn run(config: &DemoConfig) -> Vec<ScenarioReport> {
    scenarios()
        .into_iter()
        .filter(|scenario| config.selects(scenario.name))
        .map(|scenario| {
            let report = match (scenario.run)(config) {
                Ok(outcome) => ScenarioReport {
                    name: scenario.name,
                    passed: outcome.rendered == outcome.expected,
                    rendered: outcome.rendered,
                    expected: outcome.expected,
                },
                Err(err) => ScenarioReport {
                    name: scenario.name,
                    rendered: format!("error: {err}"),
                    expected: String::new(),
                    passed: false,
                },
            };
            if report.passed {
                info!(scenario = report.name, result = %report.rendered, "scenario passed");
            } else {
                warn!(
                    scenario = report.name,
                    result = %report.rendered,
                    expected = %report.expected,
                    "scenario failed"
                );
            }
            report
        })
        .collect()
}

/// `x + y`, curried.
pub fn add() -> Function {
    Function::curried("add", |x, y| Ok(Value::Integer(x.as_integer()? + y.as_integer()?)))
}

/// Concatenate two digit characters into an integer, curried.
pub fn combine_digits() -> Function {
    Function::curried("combine", |a, b| {
        let digits = format!("{}{}", a.as_char()?, b.as_char()?);
        digits
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|err| EvalError::function("combine", err.to_string()))
    })
}

/// The two-digit parser expression.
pub fn two_digits() -> Expr<Parser> {
    apply(
        apply(pure(Parser::witness(), combine_digits()), leaf(Parser::digit())),
        leaf(Parser::digit()),
    )
}

/// Render parse results as `[(value, "rest"), ...]`.
pub fn render_parses(results: &[(Value, String)]) -> String {
    let parts: Vec<String> = results
        .iter()
        .map(|(value, rest)| format!("({value}, {rest:?})"))
        .collect();
    format!("[{}]", parts.join(", "))
}

fn outcome(rendered: impl ToString, expected: impl Into<String>) -> Result<Outcome> {
    Ok(Outcome {
        rendered: rendered.to_string(),
        expected: expected.into(),
    })
}

fn map_pure(_: &DemoConfig) -> Result<Outcome> {
    let plus_five = Function::new("plus_five", |x| Ok(Value::Integer(x.as_integer()? + 5)));
    let result = evaluate(map(pure(Maybe::witness(), 10), plus_five))?;
    outcome(result, "Just(15)")
}

fn apply_add(_: &DemoConfig) -> Result<Outcome> {
    let expr = apply(
        apply(pure(Maybe::witness(), add()), leaf(Maybe::just(10))),
        leaf(Maybe::just(11)),
    );
    outcome(evaluate(expr)?, "Just(21)")
}

fn many_empty(_: &DemoConfig) -> Result<Outcome> {
    let result = evaluate(many(Maybe::witness(), empty(Maybe::witness())))?;
    outcome(result, "Just([])")
}

fn some_empty(_: &DemoConfig) -> Result<Outcome> {
    let result = evaluate(some(Maybe::witness(), empty(Maybe::witness())))?;
    outcome(result, "Nothing")
}

fn choose_fallback(_: &DemoConfig) -> Result<Outcome> {
    let result = evaluate(choose_first(empty(Maybe::witness()), pure(Maybe::witness(), 99)))?;
    outcome(result, "Just(99)")
}

fn lift_many_length(_: &DemoConfig) -> Result<Outcome> {
    let expr = lift_binary(
        |xs, n| Ok(Value::Integer(xs.as_list()?.len() as i64 + n.as_integer()?)),
        many(Maybe::witness(), empty(Maybe::witness())),
        pure(Maybe::witness(), 10),
    );
    outcome(evaluate(expr)?, "Just(10)")
}

fn parse_two_digits(config: &DemoConfig) -> Result<Outcome> {
    let parser = two_digits().interpret().force()?;
    let rendered = render_parses(&parser.run(&config.parser_input)?);
    outcome(rendered, render_parses(&expected_two_digits(&config.parser_input)))
}

fn expected_two_digits(input: &str) -> Vec<(Value, String)> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit() => {
            let value = i64::from(a.to_digit(10).unwrap_or(0) * 10 + b.to_digit(10).unwrap_or(0));
            vec![(Value::Integer(value), chars.as_str().to_string())]
        }
        _ => Vec::new(),
    }
}
