//! Tree builders standing in for the parser.
#![allow(dead_code)]

use std::rc::Rc;

use r_walk::{Expr, PrintHandler, Span, Stmt, Token, TokenType, Value};

pub fn token(ttype: TokenType, lexeme: &str) -> Token {
    Token::new(ttype, lexeme, Span::new(1, 1, 1, lexeme.len() + 1))
}

pub fn ident(name: &str) -> Token {
    token(TokenType::Identifier, name)
}

pub fn num(n: f64) -> Expr {
    Expr::new_literal(Value::Number(n))
}

pub fn text(s: &str) -> Expr {
    Expr::new_literal(Value::String(s.to_string()))
}

pub fn var(name: &str) -> Expr {
    Expr::new_variable(ident(name))
}

pub fn assign(name: &str, value: Expr) -> Expr {
    Expr::new_assign(ident(name), Rc::new(value))
}

pub fn binary(left: Expr, op: &str, right: Expr) -> Expr {
    let ttype = match op {
        "+" => TokenType::Plus,
        "-" => TokenType::Minus,
        "*" => TokenType::Star,
        "/" => TokenType::Slash,
        "<" => TokenType::Less,
        "<=" => TokenType::LessEqual,
        ">" => TokenType::Greater,
        ">=" => TokenType::GreaterEqual,
        "==" => TokenType::EqualEqual,
        "!=" => TokenType::BangEqual,
        _ => panic!("unknown operator {op}"),
    };
    Expr::new_binary(Rc::new(left), token(ttype, op), Rc::new(right))
}

pub fn call(callee: Expr, arguments: Vec<Expr>) -> Expr {
    Expr::new_call(Rc::new(callee), token(TokenType::CloseParen, ")"), arguments)
}

pub fn print(expr: Expr) -> Stmt {
    Stmt::new_print(expr)
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::new_expression(expr)
}

pub fn declare(name: &str, initializer: Option<Expr>) -> Stmt {
    Stmt::new_var(ident(name), initializer)
}

pub fn block(statements: Vec<Stmt>) -> Stmt {
    Stmt::new_block(statements)
}

pub fn ret(value: Expr) -> Stmt {
    Stmt::new_return(token(TokenType::Return, "return"), Some(value))
}

pub fn if_else(predicate: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
    Stmt::new_if(predicate, Rc::new(then_branch), else_branch.map(Rc::new))
}

pub fn function(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::new_function(
        ident(name),
        Rc::new(params.iter().map(|p| ident(p)).collect()),
        Rc::new(body),
    )
}

pub fn for_loop(init: Option<Stmt>, cond: Option<Expr>, incr: Option<Expr>, body: Stmt) -> Stmt {
    Stmt::new_for(init.map(Rc::new), cond, incr, Rc::new(body))
}

/// Runs `program` on a buffered interpreter, returning what it printed
/// and the error, if any.
pub fn run(program: &[Stmt]) -> (String, Option<r_walk::RuntimeError>) {
    let terp = r_walk::Interpreter::with_print_handler(PrintHandler::buffer());
    let result = terp.interpret(program);
    (terp.output(), result.err())
}
