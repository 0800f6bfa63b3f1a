use colored::Colorize;
use thiserror::Error;

use crate::token::Token;
use crate::value::Value;

pub type RuntimeResult<T> = Result<T, RuntimeError>;
pub type ExecResult = Result<(), Unwind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable,
    TypeError,
    DivisionByZero,
    NotCallable,
    ArityMismatch,
}

/// An error raised while evaluating, tagged with the token that caused it.
#[derive(Debug, Clone, Error)]
#[error("[line {line}] {message}", line = .token.line())]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, token: &Token, message: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.clone(),
            message: message.into(),
        }
    }

    pub fn undefined_variable(name: &Token) -> Self {
        Self::new(
            RuntimeErrorKind::UndefinedVariable,
            name,
            format!("Undefined variable '{}'.", name.lexeme),
        )
    }

    pub fn type_error(operator: &Token, message: impl Into<String>) -> Self {
        Self::new(RuntimeErrorKind::TypeError, operator, message)
    }

    pub fn division_by_zero(operator: &Token) -> Self {
        Self::new(RuntimeErrorKind::DivisionByZero, operator, "Cannot divide by zero.")
    }

    pub fn not_callable(paren: &Token) -> Self {
        Self::new(RuntimeErrorKind::NotCallable, paren, "Can only call functions.")
    }

    pub fn arity_mismatch(paren: &Token, expected: usize, got: usize) -> Self {
        Self::new(
            RuntimeErrorKind::ArityMismatch,
            paren,
            format!("Expected {} arguments but got {}.", expected, got),
        )
    }

    /// Writes the error to stderr. This is the only place the evaluator
    /// formats an error for humans.
    pub fn report(&self) {
        let location = format!("at {} near {}", self.token.span, self.token);
        eprintln!("{} {} {}", "runtime error:".red().bold(), self, location.dimmed());
    }
}

/// Why statement execution stopped early: a runtime error, or a `return`
/// travelling up to the enclosing call.
#[derive(Debug)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Value),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
