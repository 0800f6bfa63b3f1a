use std::fmt;

use super::span::Span;
use super::token_type::TokenType;

/// A lexeme as handed over by the parser. The evaluator only looks at
/// `ttype` to dispatch operators; everything else decorates error messages.
#[derive(Debug, Clone)]
pub struct Token {
    pub ttype: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(ttype: TokenType, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            ttype,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Identifier token at an unknown position, handy for natives and tests.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(TokenType::Identifier, name, Span::default())
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ttype {
            TokenType::Eof => write!(f, "end-of-file"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
