use std::fmt;

use crate::capability::{Alternative, Applicative, Functor, Instance, Kleisli, Monad, Witness};
use crate::error::Result;
use crate::suspension::Suspension;
use crate::value::{Function, Value};

/// Optional value.
#[derive(Clone, PartialEq)]
pub enum Maybe {
    /// Present.
    Just(Value),
    /// Absent; the `empty()` of this type.
    Nothing,
}

impl Maybe {
    /// `Just(value)` from anything convertible into a [`Value`].
    pub fn just(value: impl Into<Value>) -> Self {
        Maybe::Just(value.into())
    }

    /// Whether this is `Just`.
    pub fn is_just(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }

    /// Whether this is `Nothing`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Maybe::Nothing)
    }

    /// The contained value, or `default`.
    pub fn from_maybe(&self, default: Value) -> Value {
        match self {
            Maybe::Just(value) => value.clone(),
            Maybe::Nothing => default,
        }
    }

    /// `f(value)` for `Just`, `default` for `Nothing`.
    pub fn maybe(&self, default: Value, f: &Function) -> Result<Value> {
        match self {
            Maybe::Just(value) => f.call(value.clone()),
            Maybe::Nothing => Ok(default),
        }
    }
}

/// Values of every `Just`, in order.
pub fn cat_maybes<'a>(items: impl IntoIterator<Item = &'a Maybe>) -> Vec<Value> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Maybe::Just(value) => Some(value.clone()),
            Maybe::Nothing => None,
        })
        .collect()
}

/// Apply `f` to each item and keep the `Just` results.
pub fn map_maybe(
    f: impl Fn(Value) -> Result<Maybe>,
    items: impl IntoIterator<Item = Value>,
) -> Result<Vec<Value>> {
    let mut kept = Vec::new();
    for item in items {
        if let Maybe::Just(value) = f(item)? {
            kept.push(value);
        }
    }
    Ok(kept)
}

impl fmt::Display for Maybe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Maybe::Just(value) => write!(f, "Just({value})"),
            Maybe::Nothing => write!(f, "Nothing"),
        }
    }
}

impl fmt::Debug for Maybe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Functor for Maybe {
    fn fmap(&self, f: &Function) -> Result<Self> {
        match self {
            Maybe::Just(value) => Ok(Maybe::Just(f.call(value.clone())?)),
            Maybe::Nothing => Ok(Maybe::Nothing),
        }
    }
}

impl Applicative for Maybe {
    fn pure(value: Value) -> Self {
        Maybe::Just(value)
    }

    fn ap(&self, argument: &Suspension<Self>) -> Result<Self> {
        let Maybe::Just(function) = self else {
            return Ok(Maybe::Nothing);
        };
        match argument.force()? {
            Maybe::Just(value) => Ok(Maybe::Just(function.call(value)?)),
            Maybe::Nothing => Ok(Maybe::Nothing),
        }
    }
}

impl Alternative for Maybe {
    fn empty() -> Self {
        Maybe::Nothing
    }
}

impl Monad for Maybe {
    fn bind(&self, k: &Kleisli<Self>) -> Result<Self> {
        match self {
            Maybe::Just(value) => k(value.clone()),
            Maybe::Nothing => Ok(Maybe::Nothing),
        }
    }
}

impl Instance for Maybe {
    const NAME: &'static str = "Maybe";

    fn witness() -> Witness<Self> {
        Witness::new(Self::NAME).alternative().monad()
    }
}
