use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::ast::*;
use crate::callable::Callable;
use crate::desugar;
use crate::environment::Environment;
use crate::error::*;
use crate::function::Function;
use crate::native::ClockNative;
use crate::print_handler::PrintHandler;
use crate::token::{Token, TokenType};
use crate::value::Value;

pub struct Interpreter {
    environment: RefCell<Rc<Environment>>,
    printer: PrintHandler,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_print_handler(PrintHandler::Stdout)
    }

    pub fn with_print_handler(printer: PrintHandler) -> Self {
        let globals =
            Rc::new(Environment::new()).define("clock", Value::Func(Rc::new(ClockNative {})));
        Self {
            environment: RefCell::new(globals),
            printer,
        }
    }

    /// Runs top-level statements until one fails. The error is reported
    /// and returned; statements already run keep their effects.
    pub fn interpret(&self, statements: &[Stmt]) -> RuntimeResult<()> {
        debug!(statements = statements.len(), "interpret");
        for stmt in statements {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(Unwind::Return(value)) => {
                    debug!(%value, "top-level return, stopping");
                    return Ok(());
                }
                Err(Unwind::Error(error)) => {
                    debug!(kind = ?error.kind, "interpret aborted");
                    error.report();
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    pub fn execute(&self, stmt: &Stmt) -> ExecResult {
        #[cfg(feature = "debug_trace_execution")]
        {
            let printed = AstPrinter {}.print(stmt);
            tracing::trace!(stmt = %printed, "execute");
        }
        stmt.accept(self)
    }

    pub fn evaluate(&self, expr: &Expr) -> RuntimeResult<Value> {
        expr.accept(self)
    }

    /// Runs `statements` with `environment` as the current scope, restoring
    /// the previous scope however the block exits.
    pub fn execute_block(&self, statements: &[Stmt], environment: Rc<Environment>) -> ExecResult {
        let previous = self.environment.replace(environment);

        let result = statements.iter().try_for_each(|s| self.execute(s));

        self.environment.replace(previous);

        result
    }

    /// The scope the next statement would run in.
    pub fn environment(&self) -> Rc<Environment> {
        Rc::clone(&self.environment.borrow())
    }

    /// Binds `name` in the current scope, as a `var` statement would.
    pub fn define(&self, name: &str, value: Value) {
        let extended = self.environment().define(name, value);
        *self.environment.borrow_mut() = extended;
    }

    /// Output captured by a buffer print handler.
    pub fn output(&self) -> String {
        self.printer.get_output()
    }

    fn solve_number_binary(
        &self,
        solver: fn(f64, f64) -> Value,
        left: Value,
        right: Value,
        expr: &BinaryExpr,
    ) -> RuntimeResult<Value> {
        match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(solver(l, r)),
            (l, r) => Err(RuntimeError::type_error(
                &expr.operator,
                format!("Operands must be numbers, got {} and {}.", l.type_name(), r.type_name()),
            )),
        }
    }

    fn unknown_operator(operator: &Token) -> RuntimeError {
        RuntimeError::type_error(operator, format!("Unknown operator '{}'.", operator.lexeme))
    }
}

impl StmtVisitor<ExecResult> for Interpreter {
    fn visit_block_stmt(&self, stmt: &BlockStmt) -> ExecResult {
        let e = Environment::new_with_enclosing(self.environment());
        self.execute_block(&stmt.statements, Rc::new(e))
    }

    fn visit_expression_stmt(&self, stmt: &ExpressionStmt) -> ExecResult {
        self.evaluate(&stmt.expression)?;
        Ok(())
    }

    fn visit_for_stmt(&self, stmt: &ForStmt) -> ExecResult {
        self.execute(&desugar::lower_for(stmt))
    }

    fn visit_function_stmt(&self, stmt: &FunctionStmt) -> ExecResult {
        // Bind the name first so the body can see itself, then fill the cell.
        let environment = self.environment().define(&stmt.name.lexeme, Value::Nil);
        let function = Function::new(stmt, Rc::clone(&environment));
        environment.assign(&stmt.name, Value::Func(Rc::new(function)))?;
        *self.environment.borrow_mut() = environment;
        Ok(())
    }

    fn visit_if_stmt(&self, stmt: &IfStmt) -> ExecResult {
        if self.evaluate(&stmt.predicate)?.is_truthy() {
            self.execute(&stmt.then_branch)
        } else if let Some(else_branch) = &stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_print_stmt(&self, stmt: &PrintStmt) -> ExecResult {
        let value = self.evaluate(&stmt.expression)?;
        self.printer.println(&value.to_string());
        Ok(())
    }

    fn visit_return_stmt(&self, stmt: &ReturnStmt) -> ExecResult {
        let value = stmt
            .value
            .as_ref()
            .map_or(Ok(Value::Nil), |expr| self.evaluate(expr))?;
        Err(Unwind::Return(value))
    }

    fn visit_var_stmt(&self, stmt: &VarStmt) -> ExecResult {
        let value = stmt
            .initializer
            .as_ref()
            .map_or(Ok(Value::Nil), |init| self.evaluate(init))?;

        self.define(&stmt.name.lexeme, value);
        Ok(())
    }

    fn visit_while_stmt(&self, stmt: &WhileStmt) -> ExecResult {
        while self.evaluate(&stmt.predicate)?.is_truthy() {
            self.execute(&stmt.body)?;
        }
        Ok(())
    }
}

impl ExprVisitor<RuntimeResult<Value>> for Interpreter {
    fn visit_assign_expr(&self, expr: &AssignExpr) -> RuntimeResult<Value> {
        let value = self.evaluate(&expr.value)?;
        self.environment().assign(&expr.name, value.clone())?;
        Ok(value)
    }

    fn visit_binary_expr(&self, expr: &BinaryExpr) -> RuntimeResult<Value> {
        let left = self.evaluate(&expr.left)?;
        let right = self.evaluate(&expr.right)?;
        match expr.operator.ttype {
            TokenType::Minus => {
                self.solve_number_binary(|l, r| Value::Number(l - r), left, right, expr)
            }
            TokenType::Slash => match (left, right) {
                (Value::Number(_), Value::Number(r)) if r == 0.0 => {
                    Err(RuntimeError::division_by_zero(&expr.operator))
                }
                (left, right) => {
                    self.solve_number_binary(|l, r| Value::Number(l / r), left, right, expr)
                }
            },
            TokenType::Star => {
                self.solve_number_binary(|l, r| Value::Number(l * r), left, right, expr)
            }
            TokenType::Plus => match (left, right) {
                (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
                (l @ Value::String(_), r) | (l, r @ Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", l, r)))
                }
                (l, r) => Err(RuntimeError::type_error(
                    &expr.operator,
                    format!(
                        "Operands must be two numbers or at least one string, got {} and {}.",
                        l.type_name(),
                        r.type_name()
                    ),
                )),
            },
            TokenType::Less => {
                self.solve_number_binary(|l, r| Value::Bool(l < r), left, right, expr)
            }
            TokenType::LessEqual => {
                self.solve_number_binary(|l, r| Value::Bool(l <= r), left, right, expr)
            }
            TokenType::Greater => {
                self.solve_number_binary(|l, r| Value::Bool(l > r), left, right, expr)
            }
            TokenType::GreaterEqual => {
                self.solve_number_binary(|l, r| Value::Bool(l >= r), left, right, expr)
            }
            TokenType::EqualEqual => Ok(Value::Bool(left == right)),
            TokenType::BangEqual => Ok(Value::Bool(left != right)),
            _ => Err(Interpreter::unknown_operator(&expr.operator)),
        }
    }

    fn visit_call_expr(&self, expr: &CallExpr) -> RuntimeResult<Value> {
        let callee = self.evaluate(&expr.callee)?;

        let Value::Func(callable) = callee else {
            return Err(RuntimeError::not_callable(&expr.paren));
        };

        let args = expr
            .arguments
            .iter()
            .map(|a| self.evaluate(a))
            .collect::<RuntimeResult<Vec<Value>>>()?;

        if args.len() != callable.arity() {
            return Err(RuntimeError::arity_mismatch(
                &expr.paren,
                callable.arity(),
                args.len(),
            ));
        }
        callable.call(self, args)
    }

    fn visit_conditional_expr(&self, expr: &ConditionalExpr) -> RuntimeResult<Value> {
        if self.evaluate(&expr.predicate)?.is_truthy() {
            self.evaluate(&expr.then_branch)
        } else {
            self.evaluate(&expr.else_branch)
        }
    }

    fn visit_grouping_expr(&self, expr: &GroupingExpr) -> RuntimeResult<Value> {
        self.evaluate(&expr.expression)
    }

    fn visit_literal_expr(&self, expr: &LiteralExpr) -> RuntimeResult<Value> {
        Ok(expr.value.clone())
    }

    fn visit_logical_expr(&self, expr: &LogicalExpr) -> RuntimeResult<Value> {
        let left = self.evaluate(&expr.left)?;

        match (&expr.operator.ttype, left.is_truthy()) {
            (TokenType::And, true) | (TokenType::Or, false) => self.evaluate(&expr.right),
            (TokenType::And, false) | (TokenType::Or, true) => Ok(left),
            _ => Err(Interpreter::unknown_operator(&expr.operator)),
        }
    }

    fn visit_unary_expr(&self, expr: &UnaryExpr) -> RuntimeResult<Value> {
        let right = self.evaluate(&expr.right)?;
        match expr.operator.ttype {
            TokenType::Minus => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(RuntimeError::type_error(
                    &expr.operator,
                    format!("Operand must be a number, got {}.", other.type_name()),
                )),
            },
            TokenType::Bang => Ok(Value::Bool(!right.is_truthy())),
            _ => Err(Interpreter::unknown_operator(&expr.operator)),
        }
    }

    fn visit_variable_expr(&self, expr: &VariableExpr) -> RuntimeResult<Value> {
        self.environment().get(&expr.name)
    }
}
