use ariadne::Fmt;
use eqn_attrs::ErrorKind;
use eqn_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// An operand was expected, such as a number, a variable, or a parenthesized expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an expression",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
    help = format!("found {:?}", found),
)]
pub struct ExpectedExpr {
    /// The token that was found instead.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// An equation contained more than one top-level `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "an equation can only have one `=`",
    labels = ["this `=` is one too many"],
    help = format!("split the {} into separate equations", "expression".fg(EXPR)),
)]
pub struct ChainedEquality;

/// A character that is not part of the notation was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", symbol),
    labels = ["this symbol"],
    help = format!("only numbers, letters, and the operators {} are understood", "+ - * / ^ × ÷ =".fg(EXPR)),
)]
pub struct UnknownSymbol {
    /// The symbol that was found.
    pub symbol: String,
}
