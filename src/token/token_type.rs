use std::fmt;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    #[default]
    Undefined,
    OpenParen, CloseParen, OpenBrace, CloseBrace,
    Comma, Minus, Plus, Colon, Question, Semicolon, Slash, Star,

    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    Identifier, String, Number,

    And, Else, False, Fun, For, If, Nil, Or,
    Print, Return, True, Var, While,

    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
