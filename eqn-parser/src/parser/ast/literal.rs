use crate::{
    parser::{
        error::{kind, Error},
        fmt::{Canonical, Latex, LatexOptions},
        Parse,
        Parser,
    },
    tokenizer::{TokenKind, FUNCTIONS, WORDS},
};
use std::{fmt::{self, Display}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `16` or `3.14`. The value is kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the number literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Self {
                value: token.lexeme.to_owned(),
                span: token.span,
            }),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float],
                found,
            })),
        }
    }
}

impl std::fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Latex for LitNum {
    fn fmt_latex(&self, f: &mut fmt::Formatter, _: &LatexOptions) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Canonical for LitNum {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables, constants such as
/// `pi`, and the names of functions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitSym {
    /// Returns true if the symbol is printed as a LaTeX command, such as `\pi`.
    pub fn is_word(&self) -> bool {
        self.name.len() > 1
    }
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Name => Ok(Self {
                name: token.lexeme.to_owned(),
                span: token.span,
            }),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Name],
                found,
            })),
        }
    }
}

impl std::fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Latex for LitSym {
    fn fmt_latex(&self, f: &mut fmt::Formatter, _: &LatexOptions) -> fmt::Result {
        match self.name.as_str() {
            "oo" | "infty" => write!(f, "\\infty"),
            name if WORDS.contains(&name) || FUNCTIONS.contains(&name) => write!(f, "\\{}", name),
            name if name.len() == 1 => write!(f, "{}", name),
            name => write!(f, "\\mathrm{{{}}}", name),
        }
    }
}

impl Canonical for LitSym {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name.as_str() {
            "infty" => write!(f, "oo"),
            name => write!(f, "{}", name),
        }
    }
}

/// Represents a literal value in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(num) = input.try_parse::<LitNum>() {
            return Ok(Literal::Number(num));
        }
        input.try_parse::<LitSym>().map(Literal::Symbol)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}

impl Latex for Literal {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt_latex(f, options),
            Literal::Symbol(sym) => sym.fmt_latex(f, options),
        }
    }
}

impl Canonical for Literal {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt_canonical(f),
            Literal::Symbol(sym) => sym.fmt_canonical(f),
        }
    }
}
