use std::rc::Rc;

use crate::token::Token;
use crate::value::Value;

pub mod printer;

pub use printer::AstPrinter;

/// Declares a closed tree type: the enum, one struct per variant, a visitor
/// trait with one method per variant, `accept`, and a `new_*` constructor
/// per variant.
macro_rules! define_ast {
    ($base:ident, $visitor:ident {
        $(
            $variant:ident($node:ident, $visit:ident, $ctor:ident) {
                $( $field:ident : $ty:ty ),* $(,)?
            }
        ),* $(,)?
    }) => {
        #[derive(Debug, Clone)]
        pub enum $base {
            $( $variant($node), )*
        }

        $(
            #[derive(Debug, Clone)]
            pub struct $node {
                $( pub $field: $ty, )*
            }
        )*

        pub trait $visitor<T> {
            $( fn $visit(&self, node: &$node) -> T; )*
        }

        impl $base {
            pub fn accept<T, V: $visitor<T> + ?Sized>(&self, visitor: &V) -> T {
                match self {
                    $( $base::$variant(node) => visitor.$visit(node), )*
                }
            }

            $(
                pub fn $ctor($( $field: $ty ),*) -> Self {
                    $base::$variant($node { $( $field ),* })
                }
            )*
        }
    };
}

define_ast!(Expr, ExprVisitor {
    Assign(AssignExpr, visit_assign_expr, new_assign) { name: Token, value: Rc<Expr> },
    Binary(BinaryExpr, visit_binary_expr, new_binary) {
        left: Rc<Expr>,
        operator: Token,
        right: Rc<Expr>,
    },
    Call(CallExpr, visit_call_expr, new_call) {
        callee: Rc<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
    Conditional(ConditionalExpr, visit_conditional_expr, new_conditional) {
        predicate: Rc<Expr>,
        then_branch: Rc<Expr>,
        else_branch: Rc<Expr>,
    },
    Grouping(GroupingExpr, visit_grouping_expr, new_grouping) { expression: Rc<Expr> },
    Literal(LiteralExpr, visit_literal_expr, new_literal) { value: Value },
    Logical(LogicalExpr, visit_logical_expr, new_logical) {
        left: Rc<Expr>,
        operator: Token,
        right: Rc<Expr>,
    },
    Unary(UnaryExpr, visit_unary_expr, new_unary) { operator: Token, right: Rc<Expr> },
    Variable(VariableExpr, visit_variable_expr, new_variable) { name: Token },
});

define_ast!(Stmt, StmtVisitor {
    Block(BlockStmt, visit_block_stmt, new_block) { statements: Vec<Stmt> },
    Expression(ExpressionStmt, visit_expression_stmt, new_expression) { expression: Expr },
    For(ForStmt, visit_for_stmt, new_for) {
        initializer: Option<Rc<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Rc<Stmt>,
    },
    Function(FunctionStmt, visit_function_stmt, new_function) {
        name: Token,
        params: Rc<Vec<Token>>,
        body: Rc<Vec<Stmt>>,
    },
    If(IfStmt, visit_if_stmt, new_if) {
        predicate: Expr,
        then_branch: Rc<Stmt>,
        else_branch: Option<Rc<Stmt>>,
    },
    Print(PrintStmt, visit_print_stmt, new_print) { expression: Expr },
    Return(ReturnStmt, visit_return_stmt, new_return) { keyword: Token, value: Option<Expr> },
    Var(VarStmt, visit_var_stmt, new_var) { name: Token, initializer: Option<Expr> },
    While(WhileStmt, visit_while_stmt, new_while) { predicate: Expr, body: Rc<Stmt> },
});
