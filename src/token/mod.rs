pub mod span;
pub mod token;
pub mod token_type;

pub use span::Span;
pub use token::Token;
pub use token_type::TokenType;
