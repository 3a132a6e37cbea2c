use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::Error,
        fmt::{Canonical, Latex, LatexOptions},
        token::op::UnaryOp,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt::{self, Display}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
///
/// Unary expressions do not directly implement [`Parse`]; a unary operator is optional in front
/// of every operand, so [`Unary::parse_or_lower`] is used to parse either one.
///
/// [`Parse`]: crate::parser::Parse
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parse a unary expression. All unary operators are prefix operators with right
    /// associativity, and bind looser than exponentiation, so `-x^2` is `-(x^2)`.
    pub fn parse_right(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let op_precedence = op.precedence();
        let start_span = op.span.start;
        let operand = {
            let lhs = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op_precedence)?
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let starts_with_op = input.peek_token()
            .is_some_and(|token| matches!(token.kind, TokenKind::Sub | TokenKind::Add));
        if starts_with_op {
            input.try_parse_with_fn(Self::parse_right).map(Expr::Unary)
        } else {
            Primary::parse_with_superscripts(input)
        }
    }
}

impl std::fmt::Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt_latex(f, options)
    }
}

impl Canonical for Unary {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt_canonical(f)
    }
}
