use std::fmt;
use std::rc::Rc;

use crate::error::{EvalError, Result};

/// Element value carried inside a concrete instance type.
///
/// Instance types are containers whose element shape is only known at run time:
/// the repetition combinators store a curried `cons` function inside them, and
/// applicative expressions carry curried functions the same way.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// The unit value.
    Unit,
    /// Boolean literal.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Single character.
    Char(char),
    /// UTF-8 text.
    Text(String),
    /// Homogeneous or heterogeneous list.
    List(Vec<Value>),
    /// Element-level function.
    Function(Function),
}

impl Value {
    /// Integer payload.
    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(EvalError::mismatch("integer", other)),
        }
    }

    /// Character payload.
    pub fn as_char(&self) -> Result<char> {
        match self {
            Value::Char(c) => Ok(*c),
            other => Err(EvalError::mismatch("char", other)),
        }
    }

    /// Text payload.
    pub fn as_text(&self) -> Result<&str> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(EvalError::mismatch("text", other)),
        }
    }

    /// List payload.
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(EvalError::mismatch("list", other)),
        }
    }

    /// Function payload.
    pub fn as_function(&self) -> Result<&Function> {
        match self {
            Value::Function(function) => Ok(function),
            other => Err(EvalError::mismatch("function", other)),
        }
    }

    /// Apply this value as a function.
    pub fn call(&self, argument: Value) -> Result<Value> {
        self.as_function()?.call(argument)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Text(text) => write!(f, "{text:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Function(function) => write!(f, "{function}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

/// Named element-level function. Equality is identity of the shared closure.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<dyn Fn(Value) -> Result<Value>>,
}

impl Function {
    /// Wrap a one-argument closure.
    pub fn new(name: impl Into<Rc<str>>, body: impl Fn(Value) -> Result<Value> + 'static) -> Self {
        Self {
            name: name.into(),
            body: Rc::new(body),
        }
    }

    /// Curry a two-argument closure: the result takes `a` and returns a
    /// function taking `b`.
    pub fn curried(
        name: impl Into<Rc<str>>,
        body: impl Fn(Value, Value) -> Result<Value> + 'static,
    ) -> Self {
        let name: Rc<str> = name.into();
        let body = Rc::new(body);
        let outer_name = Rc::clone(&name);
        Function::new(outer_name, move |first| {
            let body = Rc::clone(&body);
            Ok(Value::Function(Function::new(
                format!("{name} {first}"),
                move |second| body(first.clone(), second),
            )))
        })
    }

    /// `x => x`
    pub fn identity() -> Self {
        Function::new("id", Ok)
    }

    /// `_ => value`
    pub fn constant(value: Value) -> Self {
        Function::new(format!("const {value}"), move |_| Ok(value.clone()))
    }

    /// `x => outer(inner(x))`
    pub fn compose(outer: &Function, inner: &Function) -> Self {
        let (outer, inner) = (outer.clone(), inner.clone());
        Function::new(format!("{} . {}", outer.name, inner.name), move |x| {
            outer.call(inner.call(x)?)
        })
    }

    /// Function name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self, argument: Value) -> Result<Value> {
        (self.body)(argument)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
