use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::callable::Callable;
use crate::error::RuntimeResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// `clock()`: seconds since the Unix epoch.
pub struct ClockNative {}

impl Callable for ClockNative {
    fn call(&self, _interpreter: &Interpreter, _args: Vec<Value>) -> RuntimeResult<Value> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Ok(Value::Number(now))
    }

    fn arity(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "clock"
    }
}
