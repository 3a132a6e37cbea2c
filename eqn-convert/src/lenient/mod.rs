//! Lenient rewriting for text that does not parse.
//!
//! Text typed into a field is incomplete most of the time (`2/(x+`), and text recognized from an
//! image often carries stray markup. None of it can be parsed, but all of it still has to be
//! converted. The functions here do so with local rewrites, each applied until it reaches a fixed
//! point (see [`crate::rewrite`]), and leave any construct they do not recognize untouched.
//!
//! The rewrites produce the same shapes as the printers in [`eqn_parser::parser::fmt`]: `(A)/(B)`
//! fractions and `base**(e)` powers in canonical notation, `\frac{A}{B}` and `^{e}` in
//! presentation notation.

mod canonical;
mod latex;
mod operand;
mod simple;

pub use canonical::{canonical_to_presentation, canonical_to_simple};
pub use latex::{clean_artifacts, presentation_to_canonical};
pub use simple::{normalize, simple_to_canonical, simple_to_presentation};

pattern!(WHITESPACE = r"\s+");

/// Collapses every run of whitespace into a single space, and trims the result.
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_owned()
}
