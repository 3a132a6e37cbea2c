use crate::{
    parser::{
        ast::{expr::{Expr, Primary}, helper::ParenDelimited, literal::LitSym},
        error::Error,
        fmt::{Canonical, Latex, LatexOptions},
        Parse,
        Parser,
    },
    tokenizer::FUNCTIONS,
};
use std::{fmt::{self, Display}, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `sqrt(x)` or `root(x, 3)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments, or of the argument itself if the
    /// call was written without parentheses, as in `sin x`.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }

    /// Writes the arguments separated by commas, using the given function to write each one.
    fn fmt_args<F>(&self, f: &mut fmt::Formatter, mut fmt_arg: F) -> fmt::Result
    where
        F: FnMut(&Expr, &mut fmt::Formatter) -> fmt::Result,
    {
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                fmt_arg(arg.innermost(), f)?;
                write!(f, ", ")?;
            }
            fmt_arg(last.innermost(), f)?;
        }
        Ok(())
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let surrounded = input.try_parse::<ParenDelimited<Expr>>()?;

        // use `name` here before it is moved into the struct
        let span = name.span.start..surrounded.end.span.end;
        Ok(Self {
            name,
            args: surrounded.value.values,
            span,
            paren_span: surrounded.start.span.start..surrounded.end.span.end,
        })
    }
}

impl Call {
    /// Parses a call written without parentheses, such as `sin x`. The argument is a single
    /// operand, so `sin 2x` is `sin(2)*x`.
    pub fn parse_bare(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let arg = Primary::parse_with_superscripts(input)?;

        let span = name.span.start..arg.span().end;
        Ok(Self {
            name,
            paren_span: arg.span(),
            args: vec![arg],
            span,
        })
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.name.fmt(f)?;
        write!(f, "(")?;
        self.fmt_args(f, |arg, f| arg.fmt(f))?;
        write!(f, ")")
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter, options: &LatexOptions) -> fmt::Result {
        let arg = |i: usize| self.args.get(i).map(Expr::innermost);

        match self.name.name.as_str() {
            "sqrt" | "cbrt" | "root" => {
                let index = match self.name.name.as_str() {
                    "cbrt" => Some("3".to_string()),
                    "root" => arg(1).map(|n| n.as_display_with(*options).to_string()),
                    _ => None,
                };
                write!(f, "\\sqrt")?;
                if let Some(index) = index {
                    write!(f, "[{}]", index)?;
                }
                write!(f, "{{")?;
                if let Some(radicand) = arg(0) {
                    radicand.fmt_latex(f, options)?;
                }
                write!(f, "}}")
            },
            "abs" => {
                write!(f, "\\left|")?;
                self.fmt_args(f, |arg, f| arg.fmt_latex(f, options))?;
                write!(f, "\\right|")
            },
            name => {
                if FUNCTIONS.contains(&name) {
                    write!(f, "\\{}", name)?;
                } else {
                    write!(f, "\\mathrm{{{}}}", name)?;
                }
                write!(f, "\\left(")?;
                self.fmt_args(f, |arg, f| arg.fmt_latex(f, options))?;
                write!(f, "\\right)")
            },
        }
    }
}

impl Canonical for Call {
    fn fmt_canonical(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt_canonical(f)?;
        write!(f, "(")?;
        self.fmt_args(f, |arg, f| arg.fmt_canonical(f))?;
        write!(f, ")")
    }
}
