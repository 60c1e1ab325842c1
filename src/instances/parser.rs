use std::fmt;
use std::rc::Rc;

use crate::capability::{Alternative, Applicative, Functor, Instance, Kleisli, Monad, Witness};
use crate::error::Result;
use crate::suspension::Suspension;
use crate::value::{Function, Value};

type Run = Rc<dyn Fn(&str) -> Result<Vec<(Value, String)>>>;

/// List-of-successes string parser.
///
/// Running a parser yields every `(result, remaining input)` pair it accepts.
/// The distinguished failing parser ([`Parser::fail`]) is this type's `empty()`;
/// it is the only parser equality recognises structurally; any two other
/// parsers are equal only when they are the same parser.
#[derive(Clone)]
pub struct Parser {
    run: Option<Run>,
}

impl Parser {
    /// Wrap a run function.
    pub fn new(run: impl Fn(&str) -> Result<Vec<(Value, String)>> + 'static) -> Self {
        Self {
            run: Some(Rc::new(run)),
        }
    }

    /// The parser that accepts nothing.
    pub fn fail() -> Self {
        Self { run: None }
    }

    /// Run against `input`.
    pub fn run(&self, input: &str) -> Result<Vec<(Value, String)>> {
        match &self.run {
            Some(run) => run(input),
            None => Ok(Vec::new()),
        }
    }

    /// Any single character.
    pub fn item() -> Self {
        Parser::satisfy(|_| true)
    }

    /// A single character matching `predicate`.
    pub fn satisfy(predicate: impl Fn(char) -> bool + 'static) -> Self {
        Parser::new(move |input| {
            let mut chars = input.chars();
            Ok(match chars.next() {
                Some(c) if predicate(c) => vec![(Value::Char(c), chars.as_str().to_string())],
                _ => Vec::new(),
            })
        })
    }

    /// A single ASCII digit.
    pub fn digit() -> Self {
        Parser::satisfy(|c| c.is_ascii_digit())
    }

    /// Exactly `expected`.
    pub fn literal(expected: char) -> Self {
        Parser::satisfy(move |c| c == expected)
    }

    /// Run-time backtracking choice: results of `self`, or of `other` on the
    /// same input when `self` accepts nothing.
    pub fn or_else(&self, other: &Parser) -> Parser {
        let (first, second) = (self.clone(), other.clone());
        Parser::new(move |input| {
            let results = first.run(input)?;
            if results.is_empty() {
                second.run(input)
            } else {
                Ok(results)
            }
        })
    }
}

impl PartialEq for Parser {
    fn eq(&self, other: &Self) -> bool {
        match (&self.run, &other.run) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.run {
            Some(_) => write!(f, "Parser(<run>)"),
            None => write!(f, "Parser(<fail>)"),
        }
    }
}

impl Functor for Parser {
    fn fmap(&self, f: &Function) -> Result<Self> {
        let Some(run) = self.run.clone() else {
            return Ok(Parser::fail());
        };
        let f = f.clone();
        Ok(Parser::new(move |input| {
            run(input)?
                .into_iter()
                .map(|(value, rest)| Ok((f.call(value)?, rest)))
                .collect()
        }))
    }
}

impl Applicative for Parser {
    fn pure(value: Value) -> Self {
        Parser::new(move |input| Ok(vec![(value.clone(), input.to_string())]))
    }

    fn ap(&self, argument: &Suspension<Self>) -> Result<Self> {
        let Some(run) = self.run.clone() else {
            return Ok(Parser::fail());
        };
        // Never forces; only an argument that is already known to fail.
        if argument.peek().is_some_and(|argument| argument.is_empty()) {
            return Ok(Parser::fail());
        }
        let argument = argument.clone();
        Ok(Parser::new(move |input| {
            let functions = run(input)?;
            if functions.is_empty() {
                return Ok(Vec::new());
            }
            let argument = argument.force()?;
            let mut results = Vec::new();
            for (function, rest) in functions {
                for (value, remaining) in argument.run(&rest)? {
                    results.push((function.call(value)?, remaining));
                }
            }
            Ok(results)
        }))
    }
}

impl Alternative for Parser {
    fn empty() -> Self {
        Parser::fail()
    }
}

impl Monad for Parser {
    fn bind(&self, k: &Kleisli<Self>) -> Result<Self> {
        let Some(run) = self.run.clone() else {
            return Ok(Parser::fail());
        };
        let k = Rc::clone(k);
        Ok(Parser::new(move |input| {
            let mut results = Vec::new();
            for (value, rest) in run(input)? {
                results.extend(k(value)?.run(&rest)?);
            }
            Ok(results)
        }))
    }
}

impl Instance for Parser {
    const NAME: &'static str = "Parser";

    fn witness() -> Witness<Self> {
        Witness::new(Self::NAME).alternative().monad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_consumes_one_character() {
        let results = Parser::digit().run("42").unwrap();
        assert_eq!(results, vec![(Value::Char('4'), "2".to_string())]);
        assert!(Parser::digit().run("x").unwrap().is_empty());
        assert!(Parser::digit().run("").unwrap().is_empty());
    }

    #[test]
    fn or_else_backtracks_on_the_same_input() {
        let parser = Parser::literal('a').or_else(&Parser::literal('b'));
        assert_eq!(parser.run("bc").unwrap(), vec![(Value::Char('b'), "c".to_string())]);
    }

    #[test]
    fn applying_to_a_known_failure_fails_outright() {
        let function = Parser::item().fmap(&Function::identity()).unwrap();
        let applied = function.ap(&Suspension::ready(Parser::fail())).unwrap();
        assert!(applied.is_empty());

        let pending = Suspension::new(|| Ok(Parser::fail()));
        let deferred = function.ap(&pending).unwrap();
        assert!(!pending.is_forced());
        assert!(!deferred.is_empty());
        assert!(deferred.run("ab").unwrap().is_empty());
    }

    #[test]
    fn only_the_failing_parser_equals_empty() {
        assert_eq!(Parser::fail(), Parser::empty());
        assert_ne!(Parser::digit(), Parser::empty());
        let digit = Parser::digit();
        assert_eq!(digit.clone(), digit);
    }
}
