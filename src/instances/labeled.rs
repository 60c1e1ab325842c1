use crate::capability::{Functor, Instance, Witness};
use crate::error::Result;
use crate::value::{Function, Value};

/// A value carrying a label. Mappable only: there is no default label to
/// build a `pure` from.
#[derive(Debug, Clone, PartialEq)]
pub struct Labeled {
    /// Label preserved by `fmap`.
    pub label: String,
    /// Mapped value.
    pub value: Value,
}

impl Labeled {
    /// Label `value`.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Functor for Labeled {
    fn fmap(&self, f: &Function) -> Result<Self> {
        Ok(Labeled {
            label: self.label.clone(),
            value: f.call(self.value.clone())?,
        })
    }
}

impl Instance for Labeled {
    const NAME: &'static str = "Labeled";

    fn witness() -> Witness<Self> {
        Witness::new(Self::NAME).functor()
    }
}
