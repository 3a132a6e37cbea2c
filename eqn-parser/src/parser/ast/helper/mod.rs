//! Helper `struct`s for parsing AST nodes.

pub mod delimited;
pub mod surrounded;

pub use delimited::Delimited;
pub use surrounded::Surrounded;

/// Type alias for a comma-separated list of values, surrounded by parentheses.
pub(crate) type ParenDelimited<T> = surrounded::Surrounded<
    crate::parser::token::OpenParen,
    crate::parser::token::CloseParen,
    delimited::Delimited<crate::parser::token::Comma, T>,
>;
