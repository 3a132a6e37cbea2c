use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            equality::Equality,
            literal::{Literal, LitNum},
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        fmt::{Canonical, Latex, LatexOptions},
        token::{op::{BinOp, BinOpKind}, Superscript},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::{TokenKind, FUNCTIONS, WORDS},
};
use std::{fmt::{self, Display}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression in the shorthand notation, including equations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),

    /// An equation with one top-level `=`, such as `2/x = 5`.
    Equality(Equality),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
            Expr::Equality(equality) => equality.span(),
        }
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns true if the expression never needs to be parenthesized when used as an operand:
    /// a single number, a single symbol, or a function call.
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Literal(_) | Expr::Call(_))
    }

    /// Returns the expression that is printed first when this expression is printed.
    pub fn leftmost(&self) -> &Expr {
        match self {
            Expr::Binary(binary) => binary.lhs.leftmost(),
            Expr::Equality(equality) => equality.lhs.leftmost(),
            _ => self,
        }
    }

    /// Returns the expression that is printed last when this expression is printed.
    pub fn rightmost(&self) -> &Expr {
        match self {
            Expr::Binary(binary) => binary.rhs.rightmost(),
            Expr::Equality(equality) => equality.rhs.rightmost(),
            Expr::Unary(unary) => unary.operand.rightmost(),
            _ => self,
        }
    }

    /// Returns the two sides of the expression if it is an equation.
    pub fn as_equality(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::Equality(equality) => Some((&equality.lhs, &equality.rhs)),
            _ => None,
        }
    }
}

/// Parses an arithmetic expression. An `=` is never consumed; see [`Equality::parse_or_lower`]
/// to parse equations.
impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
            Expr::Equality(equality) => equality.fmt(f),
        }
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_latex(f, options),
            Expr::Paren(paren) => paren.fmt_latex(f, options),
            Expr::Call(call) => call.fmt_latex(f, options),
            Expr::Unary(unary) => unary.fmt_latex(f, options),
            Expr::Binary(binary) => binary.fmt_latex(f, options),
            Expr::Equality(equality) => equality.fmt_latex(f, options),
        }
    }
}

impl Canonical for Expr {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_canonical(f),
            Expr::Paren(paren) => paren.fmt_canonical(f),
            Expr::Call(call) => call.fmt_canonical(f),
            Expr::Unary(unary) => unary.fmt_canonical(f),
            Expr::Binary(binary) => binary.fmt_canonical(f),
            Expr::Equality(equality) => equality.fmt_canonical(f),
        }
    }
}

/// Represents a primary expression: an operand that is parsed without looking at any operator.
///
/// A name followed by a parenthesis is ambiguous in isolation. `sqrt(x)` calls a function, but
/// `x(x + 1)` multiplies, so only names of more than one letter that are not known constants can
/// be called. A known function such as `sin` can also be called without parentheses.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `abs(-1)`.
    Call(Call),
}

impl Primary {
    /// Returns the span of the primary expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Primary::Literal(literal) => literal.span(),
            Primary::Paren(paren) => paren.span(),
            Primary::Call(call) => call.span(),
        }
    }

    /// Parses a primary expression, followed by any number of superscript exponents, such as the
    /// `²` in `x²`.
    pub fn parse_with_superscripts(input: &mut Parser) -> Result<Expr, Error> {
        let mut expr = Expr::from(input.try_parse::<Primary>()?);

        while let Ok(superscript) = input.try_parse::<Superscript>() {
            let value = superscript.lexeme
                .chars()
                .filter_map(superscript_digit)
                .collect::<String>();
            let start = expr.span().start;
            expr = Expr::Binary(Binary {
                lhs: Box::new(expr),
                op: BinOp {
                    kind: BinOpKind::Exp,
                    implicit: false,
                    unicode: true,
                    span: superscript.span.clone(),
                },
                rhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value,
                    span: superscript.span.clone(),
                }))),
                span: start..superscript.span.end,
            });
        }

        Ok(expr)
    }
}

/// Converts a superscript digit to its ASCII digit.
fn superscript_digit(c: char) -> Option<char> {
    "⁰¹²³⁴⁵⁶⁷⁸⁹"
        .chars()
        .position(|digit| digit == c)
        .and_then(|n| char::from_digit(n as u32, 10))
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Some(token) = input.peek_token().cloned() else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TokenKind::Int | TokenKind::Float => input.try_parse().map(Self::Literal),
            TokenKind::Name => {
                if token.lexeme.len() > 1 && !WORDS.contains(&token.lexeme) {
                    if let Ok(call) = input.try_parse::<Call>() {
                        return Ok(Self::Call(call));
                    }
                }
                if FUNCTIONS.contains(&token.lexeme) {
                    if let Ok(call) = input.try_parse_with_fn(Call::parse_bare) {
                        return Ok(Self::Call(call));
                    }
                }
                input.try_parse().map(Self::Literal)
            },
            TokenKind::OpenParen => input.try_parse().map(Self::Paren),
            TokenKind::Symbol => Err(Error::new(vec![token.span], kind::UnknownSymbol {
                symbol: token.lexeme.to_owned(),
            })),
            found => Err(Error::new(vec![token.span], kind::ExpectedExpr { found })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
