//! The conversions between the simple, presentation, and canonical notations.
//!
//! Each conversion first tries to parse its input into a syntax tree and print the tree in the
//! target notation. If parsing fails, the reason is logged at the `debug` level, and the input is
//! converted by the rewrites in [`crate::lenient`] instead.

use crate::{lenient, options::ConvertOptions};
use eqn_parser::parser::{
    ast::expr::Expr,
    fmt::{Canonical, Latex, MulGlyph},
    parse_equation,
};
use log::debug;

pattern!(FUNCTION_PREFIX = r"(?i)^\s*[a-z]\s*\(\s*[a-z]\s*\)\s*=");

/// Parses the text, logging the error if it does not parse.
fn parse(text: &str) -> Option<Expr> {
    match parse_equation(text) {
        Ok(expr) => Some(expr),
        Err(err) => {
            debug!("rewriting `{}` leniently: {}", text, err);
            None
        },
    }
}

/// Converts equations between notations, using a set of [`ConvertOptions`].
///
/// The free functions of this crate, such as [`simple_to_canonical`], use a converter with the
/// default options.
///
/// ```
/// use eqn_convert::{ConvertOptions, Converter};
/// use eqn_parser::parser::fmt::MulGlyph;
///
/// let converter = Converter::new(ConvertOptions::default().into_builder().mul(MulGlyph::Times).build());
/// assert_eq!(converter.simple_to_presentation("2*x = 6"), "2 \\times x = 6");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Creates a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this converter.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Trims the shorthand, and strips any leading function definition such as `f(x) =` if
    /// configured to.
    fn strip_function_prefix<'a>(&self, input: &'a str) -> &'a str {
        let mut text = input.trim();
        if self.options.strip_function_prefix {
            while let Some(prefix) = FUNCTION_PREFIX.find(text) {
                text = text[prefix.end()..].trim_start();
            }
        }
        text
    }

    /// Converts the simple shorthand to canonical notation.
    ///
    /// Every quotient is written as `(A)/(B)`, every power as `base**(e)`, and every
    /// multiplication with an explicit `*`. Converting the output again leaves it unchanged.
    pub fn simple_to_canonical(&self, input: &str) -> String {
        let text = self.strip_function_prefix(input);
        if text.is_empty() {
            return String::new();
        }

        match parse(text) {
            Some(expr) => expr.as_canonical().to_string(),
            None => lenient::simple_to_canonical(text),
        }
    }

    /// Converts the simple shorthand to presentation markup, for a live preview.
    pub fn simple_to_presentation(&self, input: &str) -> String {
        let text = self.strip_function_prefix(input);
        if text.is_empty() {
            return String::new();
        }

        match parse(text) {
            Some(expr) => expr.as_display_with(self.options.latex()).to_string(),
            None => self.with_mul_glyph(lenient::simple_to_presentation(text)),
        }
    }

    /// Converts presentation markup, typed or recognized from an image, to canonical notation.
    pub fn presentation_to_canonical(&self, input: &str) -> String {
        let text = input.trim();
        if text.is_empty() {
            return String::new();
        }

        let rewritten = lenient::presentation_to_canonical(text);
        match parse(&rewritten) {
            Some(expr) => expr.as_canonical().to_string(),
            None => rewritten,
        }
    }

    /// Converts canonical notation to presentation markup. An equation wrapper such as
    /// `Eq(lhs, rhs)` is printed as `lhs = rhs`.
    pub fn canonical_to_presentation(&self, input: &str) -> String {
        let text = input.trim();
        if text.is_empty() {
            return String::new();
        }

        match self.split_wrapper(text) {
            Some((lhs, rhs)) => format!(
                "{} = {}",
                self.expr_to_presentation(&lhs),
                self.expr_to_presentation(&rhs),
            ),
            None => self.expr_to_presentation(text),
        }
    }

    /// Converts canonical notation to the simple shorthand, to fill a text field with an
    /// equation that was recognized or computed. An equation wrapper such as `Eq(lhs, rhs)` is
    /// printed as `lhs = rhs`.
    pub fn canonical_to_simple(&self, input: &str) -> String {
        let text = input.trim();
        if text.is_empty() {
            return String::new();
        }

        match self.split_wrapper(text) {
            Some((lhs, rhs)) => format!("{} = {}", self.expr_to_simple(&lhs), self.expr_to_simple(&rhs)),
            None => self.expr_to_simple(text),
        }
    }

    fn expr_to_presentation(&self, text: &str) -> String {
        match parse(text) {
            Some(expr) => expr.as_display_with(self.options.latex()).to_string(),
            None => self.with_mul_glyph(lenient::canonical_to_presentation(text)),
        }
    }

    fn expr_to_simple(&self, text: &str) -> String {
        match parse(text) {
            Some(expr) => expr.to_string(),
            None => lenient::canonical_to_simple(text),
        }
    }

    /// The lenient rewrites always print `*` as `\cdot`; use the configured glyph instead.
    fn with_mul_glyph(&self, latex: String) -> String {
        match self.options.mul {
            MulGlyph::Times => latex.replace(" \\cdot ", " \\times "),
            MulGlyph::Cdot | MulGlyph::Juxtapose => latex,
        }
    }
}

/// Converts the simple shorthand to canonical notation, using the default options.
///
/// ```
/// use eqn_convert::simple_to_canonical;
///
/// assert_eq!(simple_to_canonical("x^2 + 5x = 2/x"), "x**(2)+5*x = (2)/(x)");
/// ```
pub fn simple_to_canonical(input: &str) -> String {
    Converter::default().simple_to_canonical(input)
}

/// Converts the simple shorthand to presentation markup, using the default options.
pub fn simple_to_presentation(input: &str) -> String {
    Converter::default().simple_to_presentation(input)
}

/// Converts presentation markup to canonical notation, using the default options.
///
/// ```
/// use eqn_convert::presentation_to_canonical;
///
/// assert_eq!(presentation_to_canonical("\\frac{\\frac{1}{x}}{2}"), "((1)/(x))/(2)");
/// ```
pub fn presentation_to_canonical(input: &str) -> String {
    Converter::default().presentation_to_canonical(input)
}

/// Converts canonical notation to presentation markup, using the default options.
pub fn canonical_to_presentation(input: &str) -> String {
    Converter::default().canonical_to_presentation(input)
}

/// Converts canonical notation to the simple shorthand, using the default options.
pub fn canonical_to_simple(input: &str) -> String {
    Converter::default().canonical_to_simple(input)
}
