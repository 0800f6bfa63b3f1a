use std::rc::Rc;

use tracing::debug;

use crate::ast::FunctionStmt;
use crate::ast::Stmt;
use crate::callable::Callable;
use crate::environment::Environment;
use crate::error::{RuntimeResult, Unwind};
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::Value;

/// A user-defined function together with the environment it closed over.
#[derive(Debug)]
pub struct Function {
    name: Token,
    params: Rc<Vec<Token>>,
    body: Rc<Vec<Stmt>>,
    closure: Rc<Environment>,
}

impl Function {
    pub fn new(definition: &FunctionStmt, closure: Rc<Environment>) -> Self {
        Self {
            name: definition.name.clone(),
            params: Rc::clone(&definition.params),
            body: Rc::clone(&definition.body),
            closure,
        }
    }
}

impl Callable for Function {
    #[tracing::instrument(level = "debug", skip_all, fields(name = %self.name.lexeme))]
    fn call(&self, interpreter: &Interpreter, args: Vec<Value>) -> RuntimeResult<Value> {
        let frame = Rc::new(Environment::new_with_enclosing(Rc::clone(&self.closure)));
        let environment = self
            .params
            .iter()
            .zip(args)
            .fold(frame, |env, (param, arg)| env.define(&param.lexeme, arg));

        match interpreter.execute_block(&self.body, environment) {
            Ok(()) => Ok(Value::Nil),
            Err(Unwind::Return(value)) => {
                debug!(%value, "return");
                Ok(value)
            }
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }

    fn name(&self) -> &str {
        &self.name.lexeme
    }
}
