use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    fmt::{Canonical, Latex, LatexOptions},
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use std::{fmt::{self, Display}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if let Ok(close_paren) = input.try_parse::<CloseParen>() {
            return Err(Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                kind::EmptyParenthesis,
            ));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new(
                vec![open_paren.span.clone()],
                kind::UnclosedParenthesis { opening: true },
            ))?;

        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}

/// Nested parentheses such as `((x))` are printed once.
impl std::fmt::Display for Paren {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;
        self.innermost().fmt(f)?;
        write!(f, ")")
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        write!(f, "\\left(")?;
        self.innermost().fmt_latex(f, options)?;
        write!(f, "\\right)")
    }
}

impl Canonical for Paren {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.innermost().fmt_canonical(f)?;
        write!(f, ")")
    }
}
