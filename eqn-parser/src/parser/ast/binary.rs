use crate::parser::{
    ast::{expr::Expr, literal::Literal, unary::Unary},
    error::Error,
    fmt::{fmt_canonical_div, fmt_canonical_pow, fmt_pow, Canonical, Latex, LatexOptions, MulGlyph},
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt::{self, Display}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the next binary operator without consuming it.
    ///
    /// If there is no operator, but the next token can begin an operand (as in `2x` or
    /// `3(x + 1)`), an implicit multiplication operator is returned instead. Its span is empty and
    /// is fixed up once both operands are known.
    fn peek_op(input: &mut Parser) -> Option<BinOp> {
        if let Ok(op) = input.peek::<BinOp>() {
            return Some(op);
        }

        let token = input.peek_token()?;
        if token.kind.starts_operand() {
            Some(BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                unicode: false,
                span: token.span.start..token.span.start,
            })
        } else {
            None
        }
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. However, before we build the
    /// corresponding AST node, we should check if the operator after `2` has higher precedence
    /// than `+` (if it exists).
    ///
    /// If it does, we should parse the expression starting with `2` first, so that we get `2 * 3`
    /// as the right-hand-side to the `1 +` node. This works by calling into [`Self::parse_expr`]
    /// again, but with `rhs` (`2` in this case) as the `lhs` argument.
    ///
    /// If it does not (such as in the expression `3 * 2 + 1`), we build the AST node `3 * 2`
    /// first. Then, [`Self::parse_expr`] will pick up the `+ 1` part of the expression, and
    /// build the AST node `3 * 2 + 1`.
    ///
    /// Implicit multiplication goes through the same procedure, since [`Self::peek_op`] reports it
    /// as an ordinary operator with the precedence of multiplication. In `1 + 2x`, the operator
    /// after `2` is an implicit multiplication, which binds tighter than `+`.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOp,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        while let Some(next_op) = Self::peek_op(input) {
            let next_precedence = next_op.precedence();
            if next_precedence > precedence
                || (next_precedence == precedence && next_op.associativity() == Associativity::Right)
            {
                // this operator has a higher precedence or it is right associative, so we should
                // parse its expression starting with `rhs` first
                rhs = Self::parse_expr(input, rhs, next_precedence)?;
            } else {
                // lower precedence, or equal precedence and left-associativity, as in
                // `1 * 2 + 3` or `1 * 2 * 3`; let `lhs` become `1 * 2` and pick up the operator
                // on the next iteration of the outer loop
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        let op = if op.implicit {
            BinOp { span: lhs.span().end..rhs.span().start, ..op }
        } else {
            op
        };

        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand side of a potential binary expression, parse ahead to see if
    /// there is a binary operator with at least the given precedence and a right-hand side.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        while let Some(op) = Self::peek_op(input) {
            if op.precedence() < precedence {
                break;
            }

            if !op.implicit {
                input.next_token()?;
            }

            let rhs = Unary::parse_or_lower(input)?;
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }
}

/// Returns true if the expression must be parenthesized when it is the base of a power.
fn base_needs_parens(expr: &Expr) -> bool {
    matches!(expr, Expr::Unary(_) | Expr::Binary(_) | Expr::Equality(_))
}

/// Returns true if the expression must be parenthesized when it is an exponent. Powers are
/// right-associative, so a nested power needs none.
fn exponent_needs_parens(expr: &Expr) -> bool {
    match expr {
        Expr::Binary(binary) => binary.op.kind != BinOpKind::Exp,
        Expr::Equality(_) => true,
        _ => false,
    }
}

/// Writes the expression in shorthand, with parentheses if `parens` is true.
fn fmt_grouped(f: &mut fmt::Formatter, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes an operand of an explicit operator in shorthand. Parentheses around a single number,
/// symbol, or call are dropped.
fn fmt_operand(f: &mut fmt::Formatter, expr: &Expr) -> fmt::Result {
    let inner = expr.innermost();
    if inner.is_atom() {
        write!(f, "{}", inner)
    } else {
        write!(f, "{}", expr)
    }
}

/// Returns true if placing the two factors side by side in LaTeX would merge them into something
/// else, such as `2` and `3` becoming `23`.
fn needs_explicit_mul(rhs: &Expr) -> bool {
    matches!(rhs.leftmost(), Expr::Literal(Literal::Number(_)) | Expr::Unary(_))
}

/// Returns true if the left factor ends in a LaTeX command that would swallow a letter on the
/// right, as in `\pi r`.
fn needs_space(lhs: &Expr, rhs: &Expr) -> bool {
    let ends_in_word = matches!(lhs.rightmost(), Expr::Literal(Literal::Symbol(sym)) if sym.is_word());
    ends_in_word && matches!(rhs.leftmost(), Expr::Literal(Literal::Symbol(_)))
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => {
                let base = self.lhs.innermost();
                fmt_grouped(f, base, base_needs_parens(base))?;
                self.op.fmt(f)?;
                let exponent = self.rhs.innermost();
                fmt_grouped(f, exponent, exponent_needs_parens(exponent))
            },
            BinOpKind::Div => {
                let lhs = self.lhs.innermost();
                let lhs_parens = match lhs {
                    Expr::Binary(binary) => binary.op.precedence() < Precedence::Factor,
                    Expr::Equality(_) => true,
                    _ => false,
                };
                fmt_grouped(f, lhs, lhs_parens)?;
                self.op.fmt(f)?;
                let rhs = self.rhs.innermost();
                let rhs_parens = match rhs {
                    Expr::Binary(binary) => binary.op.precedence() <= Precedence::Factor,
                    Expr::Unary(_) | Expr::Equality(_) => true,
                    _ => false,
                };
                fmt_grouped(f, rhs, rhs_parens)
            },
            _ if self.op.implicit => {
                self.lhs.fmt(f)?;
                self.rhs.fmt(f)
            },
            _ => {
                fmt_operand(f, &self.lhs)?;
                self.op.fmt(f)?;
                fmt_operand(f, &self.rhs)
            },
        }
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => fmt_pow(f, Some(&*self.lhs), Some(&*self.rhs), options),
            BinOpKind::Div if self.op.unicode => {
                self.lhs.fmt_latex(f, options)?;
                write!(f, " \\div ")?;
                self.rhs.fmt_latex(f, options)
            },
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.innermost().fmt_latex(f, options)?;
                write!(f, "}}{{")?;
                self.rhs.innermost().fmt_latex(f, options)?;
                write!(f, "}}")
            },
            BinOpKind::Mul => {
                let glyph = if self.op.unicode {
                    MulGlyph::Times
                } else if self.op.implicit {
                    MulGlyph::Juxtapose
                } else {
                    options.mul
                };

                self.lhs.fmt_latex(f, options)?;
                match glyph {
                    MulGlyph::Juxtapose if needs_explicit_mul(&self.rhs) => {
                        write!(f, "{}", MulGlyph::Cdot.as_latex())?
                    },
                    MulGlyph::Juxtapose if needs_space(&self.lhs, &self.rhs) => write!(f, " ")?,
                    glyph => write!(f, "{}", glyph.as_latex())?,
                }
                self.rhs.fmt_latex(f, options)
            },
            BinOpKind::Add | BinOpKind::Sub => {
                self.lhs.fmt_latex(f, options)?;
                self.op.fmt(f)?;
                self.rhs.fmt_latex(f, options)
            },
        }
    }
}

impl Canonical for Binary {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => fmt_canonical_pow(f, &self.lhs, &self.rhs),
            BinOpKind::Div => fmt_canonical_div(f, &self.lhs, &self.rhs),
            BinOpKind::Mul => {
                self.lhs.fmt_canonical(f)?;
                write!(f, "*")?;
                self.rhs.fmt_canonical(f)
            },
            BinOpKind::Add | BinOpKind::Sub => {
                self.lhs.fmt_canonical(f)?;
                self.op.fmt(f)?;
                self.rhs.fmt_canonical(f)
            },
        }
    }
}
