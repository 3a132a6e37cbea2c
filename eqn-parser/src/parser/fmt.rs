//! Printers for the presentation (LaTeX) and canonical notations. The shorthand notation is
//! printed through each AST node's [`Display`] implementation.

use std::fmt::{Display, Formatter, Result};
use super::ast::expr::Expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The glyph used in LaTeX output for an explicit multiplication written as `*`.
///
/// Multiplication written as `×` is always printed as `\times`, and implicit multiplication is
/// printed by juxtaposition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MulGlyph {
    /// `\cdot`
    #[default]
    Cdot,

    /// `\times`
    Times,

    /// No glyph at all, so `2*x` is printed as `2x`. A `\cdot` is still used when the factor on
    /// the right starts with a number or a sign, so that `2*3` does not become `23`.
    Juxtapose,
}

impl MulGlyph {
    /// Returns the LaTeX for this glyph, including surrounding spaces.
    pub fn as_latex(&self) -> &'static str {
        match self {
            Self::Cdot => " \\cdot ",
            Self::Times => " \\times ",
            Self::Juxtapose => "",
        }
    }
}

/// Options that control how an expression is printed as LaTeX.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatexOptions {
    /// The glyph used for explicit multiplication.
    pub mul: MulGlyph,
}

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter, options: &LatexOptions) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`], using the default
    /// options.
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self, LatexOptions::default())
    }

    /// Wraps the value in a [`LatexFormatter`] with the given options.
    fn as_display_with(&self, options: LatexOptions) -> LatexFormatter<'_, Self> {
        LatexFormatter(self, options)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T, LatexOptions);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f, &self.1)
    }
}

/// A trait for types that can be formatted in the canonical notation consumed by computer
/// algebra systems, where every operator is explicit and every quotient and exponent is
/// parenthesized.
pub trait Canonical {
    /// Format the value in canonical notation.
    fn fmt_canonical(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`CanonicalFormatter`], which implements [`Display`].
    fn as_canonical(&self) -> CanonicalFormatter<'_, Self> {
        CanonicalFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Canonical`].
pub struct CanonicalFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for CanonicalFormatter<'_, T>
where
    T: Canonical,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_canonical(f)
    }
}

/// Helper to format powers as LaTeX.
pub fn fmt_pow(
    f: &mut Formatter,
    left: Option<&Expr>,
    right: Option<&Expr>,
    options: &LatexOptions,
) -> Result {
    if let Some(left) = left {
        let left = left.innermost();
        match left {
            Expr::Unary(_) | Expr::Binary(_) | Expr::Equality(_) => {
                write!(f, "\\left(")?;
                left.fmt_latex(f, options)?;
                write!(f, "\\right)")?;
            },
            _ => left.fmt_latex(f, options)?,
        }
    }
    write!(f, "^{{")?;
    if let Some(right) = right {
        right.innermost().fmt_latex(f, options)?;
    }
    write!(f, "}}")
}

/// Helper to format a quotient in canonical notation: both operands are always parenthesized.
pub fn fmt_canonical_div(f: &mut Formatter, left: &Expr, right: &Expr) -> Result {
    write!(f, "(")?;
    left.innermost().fmt_canonical(f)?;
    write!(f, ")/(")?;
    right.innermost().fmt_canonical(f)?;
    write!(f, ")")
}

/// Helper to format a power in canonical notation. The base is left bare only if it is a single
/// number, symbol, or function call; the exponent is always parenthesized.
pub fn fmt_canonical_pow(f: &mut Formatter, left: &Expr, right: &Expr) -> Result {
    let left = left.innermost();
    if left.is_atom() {
        left.fmt_canonical(f)?;
    } else {
        write!(f, "(")?;
        left.fmt_canonical(f)?;
        write!(f, ")")?;
    }
    write!(f, "**(")?;
    right.innermost().fmt_canonical(f)?;
    write!(f, ")")
}
