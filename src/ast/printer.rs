use super::*;

/// Renders trees as s-expressions, used for execution traces and tests.
pub struct AstPrinter {}

impl AstPrinter {
    pub fn print(&self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut builder = format!("({name}");
        for expr in exprs {
            builder = format!("{builder} {}", expr.accept(self));
        }
        format!("{builder})")
    }

    fn sequence(&self, statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_assign_expr(&self, expr: &AssignExpr) -> String {
        format!("(set {} {})", expr.name.lexeme, expr.value.accept(self))
    }

    fn visit_binary_expr(&self, expr: &BinaryExpr) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.left, &*expr.right])
    }

    fn visit_call_expr(&self, expr: &CallExpr) -> String {
        let mut exprs = vec![expr.callee.as_ref()];
        exprs.extend(expr.arguments.iter());
        self.parenthesize("call", &exprs)
    }

    fn visit_conditional_expr(&self, expr: &ConditionalExpr) -> String {
        self.parenthesize("?:", &[&*expr.predicate, &*expr.then_branch, &*expr.else_branch])
    }

    fn visit_grouping_expr(&self, expr: &GroupingExpr) -> String {
        self.parenthesize("group", &[&*expr.expression])
    }

    fn visit_literal_expr(&self, expr: &LiteralExpr) -> String {
        match &expr.value {
            Value::String(s) => format!("\"{}\"", s),
            value => value.to_string(),
        }
    }

    fn visit_logical_expr(&self, expr: &LogicalExpr) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.left, &*expr.right])
    }

    fn visit_unary_expr(&self, expr: &UnaryExpr) -> String {
        self.parenthesize(&expr.operator.lexeme, &[&*expr.right])
    }

    fn visit_variable_expr(&self, expr: &VariableExpr) -> String {
        expr.name.lexeme.clone()
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_block_stmt(&self, stmt: &BlockStmt) -> String {
        format!("(block {})", self.sequence(&stmt.statements))
    }

    fn visit_expression_stmt(&self, stmt: &ExpressionStmt) -> String {
        stmt.expression.accept(self)
    }

    fn visit_for_stmt(&self, stmt: &ForStmt) -> String {
        let part = |expr: &Option<Expr>| expr.as_ref().map_or("_".to_string(), |e| e.accept(self));
        format!(
            "(for {} {} {} {})",
            stmt.initializer.as_ref().map_or("_".to_string(), |s| s.accept(self)),
            part(&stmt.condition),
            part(&stmt.increment),
            stmt.body.accept(self)
        )
    }

    fn visit_function_stmt(&self, stmt: &FunctionStmt) -> String {
        let params = stmt
            .params
            .iter()
            .map(|p| p.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        format!("(fun {} ({}) {})", stmt.name.lexeme, params, self.sequence(&stmt.body))
    }

    fn visit_if_stmt(&self, stmt: &IfStmt) -> String {
        let predicate = stmt.predicate.accept(self);
        let then = stmt.then_branch.accept(self);
        let mut str = format!("(if {} {}", predicate, then);
        if let Some(else_branch) = &stmt.else_branch {
            str = format!("{} {}", str, else_branch.accept(self));
        }
        format!("{})", str)
    }

    fn visit_print_stmt(&self, stmt: &PrintStmt) -> String {
        self.parenthesize("print", &[&stmt.expression])
    }

    fn visit_return_stmt(&self, stmt: &ReturnStmt) -> String {
        match &stmt.value {
            Some(value) => self.parenthesize("return", &[value]),
            None => "(return)".to_string(),
        }
    }

    fn visit_var_stmt(&self, stmt: &VarStmt) -> String {
        match &stmt.initializer {
            Some(init) => format!("(var {} {})", stmt.name.lexeme, init.accept(self)),
            None => format!("(var {})", stmt.name.lexeme),
        }
    }

    fn visit_while_stmt(&self, stmt: &WhileStmt) -> String {
        format!("(while {} {})", stmt.predicate.accept(self), stmt.body.accept(self))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::token::{Span, TokenType};

    fn token(ttype: TokenType, lexeme: &str) -> Token {
        Token::new(ttype, lexeme, Span::new(1, 1, 1, 1))
    }

    fn number(n: f64) -> Rc<Expr> {
        Rc::new(Expr::new_literal(Value::Number(n)))
    }

    #[test]
    fn prints_nested_expression() {
        let expr = Expr::new_binary(
            Rc::new(Expr::new_unary(token(TokenType::Minus, "-"), number(123.0))),
            token(TokenType::Star, "*"),
            Rc::new(Expr::new_grouping(number(45.67))),
        );

        assert_eq!(AstPrinter {}.print_expr(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn prints_statements() {
        let stmt = Stmt::new_block(vec![
            Stmt::new_var(token(TokenType::Identifier, "a"), Some(Expr::new_literal("x".into()))),
            Stmt::new_print(Expr::new_variable(token(TokenType::Identifier, "a"))),
        ]);

        assert_eq!(AstPrinter {}.print(&stmt), "(block (var a \"x\") (print a))");
    }
}
