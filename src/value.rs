use std::fmt;
use std::rc::Rc;

use crate::callable::Callable;

/// Every runtime value the evaluator can produce.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    Func(Rc<dyn Callable>),
    Nil,
}

impl Value {
    /// `nil` and `false` are falsy, everything else (including `0` and `""`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Nil)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Func(_) => "function",
            Value::Nil => "nil",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(l), Value::String(r)) => l == r,
            // bitwise, so `-0 != 0` and `NaN == NaN`
            (Value::Number(l), Value::Number(r)) => {
                l.to_bits() == r.to_bits() || (l.is_nan() && r.is_nan())
            }
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Func(l), Value::Func(r)) => std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(r)),
            (Value::Nil, Value::Nil) => true,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Text form used by `print` and by string concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => {
                let text = format!("{:?}", n);
                write!(f, "{}", text.strip_suffix(".0").unwrap_or(&text))
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Func(func) => write!(f, "<fn {}>", func.name()),
            Value::Nil => write!(f, "nil"),
        }
    }
}
