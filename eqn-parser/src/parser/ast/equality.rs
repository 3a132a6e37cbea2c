use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    fmt::{Canonical, Latex, LatexOptions},
    token::Equals,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation, such as `2/x = 5`. Only one `=` may appear outside of parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equality {
    /// The left-hand side of the equation.
    pub lhs: Box<Expr>,

    /// The right-hand side of the equation.
    pub rhs: Box<Expr>,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Equality {
    /// Returns the span of the equation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses an equation, or an expression if there is no `=`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let lhs = input.try_parse::<Expr>()?;
        if input.try_parse::<Equals>().is_err() {
            return Ok(lhs);
        }

        let rhs = input.try_parse::<Expr>()?;
        if let Ok(extra) = input.try_parse::<Equals>() {
            return Err(Error::new(vec![extra.span], kind::ChainedEquality));
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Equality(Self {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }))
    }
}

impl std::fmt::Display for Equality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Latex for Equality {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        self.lhs.fmt_latex(f, options)?;
        write!(f, " = ")?;
        self.rhs.fmt_latex(f, options)
    }
}

impl Canonical for Equality {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt_canonical(f)?;
        write!(f, " = ")?;
        self.rhs.fmt_canonical(f)
    }
}
