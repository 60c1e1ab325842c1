//! Memoizing suspension cells
//!
//! A [`Suspension`] wraps a producer that runs at most once successfully. The
//! producer may itself hand back another suspension ([`Step::Suspended`]); forcing
//! unwraps that chain and caches only the terminal value.
//!
//! Cells are `Rc`-based and therefore confined to one thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::{EvalError, Result};

type Producer<T> = Rc<dyn Fn() -> Result<Step<T>>>;

/// Outcome of running a producer once.
pub enum Step<T> {
    /// A terminal value.
    Value(T),
    /// Another suspension whose terminal value is the result.
    Suspended(Suspension<T>),
}

enum State<T> {
    Unforced { producer: Producer<T>, failures: u32 },
    Forcing,
    Forced(T),
}

/// Lazily evaluated, memoizing single-value container.
pub struct Suspension<T> {
    inner: Rc<RefCell<State<T>>>,
}

impl<T> Clone for Suspension<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Suspension<T> {
    /// Suspend a producer that yields a terminal value.
    pub fn new(producer: impl Fn() -> Result<T> + 'static) -> Self {
        Self::from_step(move || producer().map(Step::Value))
    }

    /// Suspend a producer that yields another suspension.
    pub fn defer(producer: impl Fn() -> Result<Suspension<T>> + 'static) -> Self {
        Self::from_step(move || producer().map(Step::Suspended))
    }

    /// Suspend a producer that decides per call whether it is done.
    pub fn from_step(producer: impl Fn() -> Result<Step<T>> + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(State::Unforced {
                producer: Rc::new(producer),
                failures: 0,
            })),
        }
    }

    /// A cell that is already forced.
    pub fn ready(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(State::Forced(value))),
        }
    }

    /// Force the cell, running the producer if it has not yet succeeded.
    ///
    /// A failing producer leaves the cell unforced so the next call retries it.
    /// Forcing a cell from inside its own producer returns [`EvalError::Reentrant`].
    pub fn force(&self) -> Result<T> {
        let (producer, failures) = {
            let mut state = self.inner.borrow_mut();
            match &*state {
                State::Forced(value) => return Ok(value.clone()),
                State::Forcing => return Err(EvalError::Reentrant),
                State::Unforced { producer, failures } => {
                    let taken = (Rc::clone(producer), *failures);
                    *state = State::Forcing;
                    taken
                }
            }
        };

        if failures > 0 {
            trace!(failures, "re-running suspension producer after earlier failure");
        }

        let outcome = producer().and_then(|step| match step {
            Step::Value(value) => Ok(value),
            Step::Suspended(next) => next.force(),
        });

        let mut state = self.inner.borrow_mut();
        match outcome {
            Ok(value) => {
                *state = State::Forced(value.clone());
                Ok(value)
            }
            Err(err) => {
                *state = State::Unforced {
                    producer,
                    failures: failures + 1,
                };
                Err(err)
            }
        }
    }

    /// Cached value, if the cell has been forced. Never runs the producer.
    pub fn peek(&self) -> Option<T> {
        match &*self.inner.borrow() {
            State::Forced(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Derived suspension applying `f` to this cell's value when forced.
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(T) -> Result<U> + 'static) -> Suspension<U> {
        let source = self.clone();
        Suspension::new(move || f(source.force()?))
    }
}

impl<T> Suspension<T> {
    /// Whether the cell holds a cached terminal value.
    pub fn is_forced(&self) -> bool {
        matches!(&*self.inner.borrow(), State::Forced(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for Suspension<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(state) => match &*state {
                State::Forced(value) => write!(f, "Suspension({value:?})"),
                State::Forcing => write!(f, "Suspension(<forcing>)"),
                State::Unforced { .. } => write!(f, "Suspension(<unforced>)"),
            },
            Err(_) => write!(f, "Suspension(<forcing>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn chained_suspensions_cache_terminal_value() {
        let inner_runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&inner_runs);
        let inner = Suspension::new(move || {
            counter.set(counter.get() + 1);
            Ok(7_i64)
        });
        let outer = Suspension::defer(move || Ok(inner.clone()));

        assert_eq!(outer.force().unwrap(), 7);
        assert_eq!(outer.force().unwrap(), 7);
        assert_eq!(outer.peek(), Some(7));
        assert_eq!(inner_runs.get(), 1);
    }

    #[test]
    fn self_reference_is_reported_not_hung() {
        let slot: Rc<RefCell<Option<Suspension<i64>>>> = Rc::new(RefCell::new(None));
        let handle = Rc::clone(&slot);
        let cell = Suspension::defer(move || {
            handle
                .borrow()
                .clone()
                .ok_or_else(|| EvalError::function("self", "slot empty"))
        });
        *slot.borrow_mut() = Some(cell.clone());

        assert_eq!(cell.force(), Err(EvalError::Reentrant));
        assert!(!cell.is_forced());
    }

    #[test]
    fn debug_does_not_force() {
        let cell = Suspension::new(|| Ok(1_i64));
        assert_eq!(format!("{cell:?}"), "Suspension(<unforced>)");
        cell.force().unwrap();
        assert_eq!(format!("{cell:?}"), "Suspension(1)");
    }
}
