use std::fmt;

use crate::error::RuntimeResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Anything a call expression can invoke. The interpreter checks the
/// argument count against `arity` before calling.
pub trait Callable {
    fn call(&self, interpreter: &Interpreter, args: Vec<Value>) -> RuntimeResult<Value>;
    fn arity(&self) -> usize;
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({}/{})", self.name(), self.arity())
    }
}
