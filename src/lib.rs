//! A tree-walking evaluator for a small dynamically typed scripting language.
//!
//! The parser lives elsewhere; this crate takes its statement trees, runs
//! them against a persistent environment and writes `print` output to a
//! [`PrintHandler`].

pub mod ast;
pub mod callable;
pub mod desugar;
pub mod environment;
pub mod error;
pub mod function;
pub mod interpreter;
pub mod native;
pub mod print_handler;
pub mod token;
pub mod value;

pub use ast::{AstPrinter, Expr, Stmt};
pub use environment::Environment;
pub use error::{RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use interpreter::Interpreter;
pub use print_handler::PrintHandler;
pub use token::{Span, Token, TokenType};
pub use value::Value;
