//! Lowers `for` loops into the primitive forms the interpreter runs:
//!
//! ```text
//! for (init; cond; incr) body   =>   { init; while (cond) { body; incr; } }
//! ```
//!
//! A missing condition becomes `true`; a missing initializer or increment is
//! left out. The outer block gives the loop variable its own scope.

use std::rc::Rc;

use crate::ast::*;
use crate::value::Value;

/// Rewrites every `for` in `statements`, including nested ones.
pub fn desugar(statements: &[Stmt]) -> Vec<Stmt> {
    statements.iter().map(|stmt| stmt.accept(&Desugarer {})).collect()
}

/// Lowers a single `for` node. Nested `for` loops in its parts are kept
/// as they are.
pub fn lower_for(stmt: &ForStmt) -> Stmt {
    build_loop(
        stmt.initializer.as_deref().cloned(),
        stmt.condition.clone(),
        stmt.increment.clone(),
        stmt.body.as_ref().clone(),
    )
}

fn build_loop(
    initializer: Option<Stmt>,
    condition: Option<Expr>,
    increment: Option<Expr>,
    body: Stmt,
) -> Stmt {
    let body = match increment {
        Some(increment) => Stmt::new_block(vec![body, Stmt::new_expression(increment)]),
        None => body,
    };
    let condition = condition.unwrap_or_else(|| Expr::new_literal(Value::Bool(true)));
    let looping = Stmt::new_while(condition, Rc::new(body));

    Stmt::new_block(initializer.into_iter().chain([looping]).collect())
}

struct Desugarer {}

impl Desugarer {
    fn lower(&self, stmt: &Stmt) -> Stmt {
        stmt.accept(self)
    }

    fn lower_rc(&self, stmt: &Rc<Stmt>) -> Rc<Stmt> {
        Rc::new(self.lower(stmt))
    }
}

impl StmtVisitor<Stmt> for Desugarer {
    fn visit_block_stmt(&self, stmt: &BlockStmt) -> Stmt {
        Stmt::new_block(stmt.statements.iter().map(|s| self.lower(s)).collect())
    }

    fn visit_expression_stmt(&self, stmt: &ExpressionStmt) -> Stmt {
        Stmt::Expression(stmt.clone())
    }

    fn visit_for_stmt(&self, stmt: &ForStmt) -> Stmt {
        build_loop(
            stmt.initializer.as_deref().map(|s| self.lower(s)),
            stmt.condition.clone(),
            stmt.increment.clone(),
            self.lower(&stmt.body),
        )
    }

    fn visit_function_stmt(&self, stmt: &FunctionStmt) -> Stmt {
        Stmt::new_function(
            stmt.name.clone(),
            Rc::clone(&stmt.params),
            Rc::new(stmt.body.iter().map(|s| self.lower(s)).collect()),
        )
    }

    fn visit_if_stmt(&self, stmt: &IfStmt) -> Stmt {
        Stmt::new_if(
            stmt.predicate.clone(),
            self.lower_rc(&stmt.then_branch),
            stmt.else_branch.as_ref().map(|s| self.lower_rc(s)),
        )
    }

    fn visit_print_stmt(&self, stmt: &PrintStmt) -> Stmt {
        Stmt::Print(stmt.clone())
    }

    fn visit_return_stmt(&self, stmt: &ReturnStmt) -> Stmt {
        Stmt::Return(stmt.clone())
    }

    fn visit_var_stmt(&self, stmt: &VarStmt) -> Stmt {
        Stmt::Var(stmt.clone())
    }

    fn visit_while_stmt(&self, stmt: &WhileStmt) -> Stmt {
        Stmt::new_while(stmt.predicate.clone(), self.lower_rc(&stmt.body))
    }
}
