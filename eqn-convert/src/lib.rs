//! Conversions between the three notations an equation passes through on its way from a text
//! field to a solver:
//!
//! - the **simple** shorthand typed by the user, such as `2/x = 5` or `x² + 1`,
//! - **presentation** markup (LaTeX) rendered as a live preview, such as `\frac{2}{x}=5`,
//! - the **canonical** syntax accepted by the solver, such as `Eq((2)/(x), 5)`.
//!
//! Every converter is total: it never fails and never panics, and returns a best-effort string for
//! any input. Input that parses (see [`eqn_parser::parser::parse_equation`]) is printed directly
//! from its syntax tree. Input that does not parse, such as a half-typed `2/(x+`, is rewritten by
//! a set of lenient rules instead, each applied until it reaches a fixed point.
//!
//! ```
//! use eqn_convert::{simple_to_canonical, simple_to_presentation, wrap_simple};
//!
//! assert_eq!(simple_to_canonical("1/x+1/2"), "(1)/(x)+(1)/(2)");
//! assert_eq!(simple_to_presentation("x^2 = 4"), "x^{2} = 4");
//! assert_eq!(wrap_simple("(x+1)/(x-2) = 3").as_deref(), Some("Eq((x+1)/(x-2), 3)"));
//! ```

/// Declares a lazily compiled regular expression.
macro_rules! pattern {
    ($(#[$attr:meta])* $vis:vis $name:ident = $re:literal) => {
        $(#[$attr])*
        $vis static $name: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($re).expect("valid regex literal"));
    };
}

pub mod checker;
pub mod convert;
pub mod equality;
pub mod lenient;
pub mod options;
pub mod request;
pub mod rewrite;
pub mod scan;

#[cfg(test)]
mod proptests;

pub use checker::to_checker_equation;
pub use convert::{
    canonical_to_presentation,
    canonical_to_simple,
    presentation_to_canonical,
    simple_to_canonical,
    simple_to_presentation,
    Converter,
};
pub use equality::{
    rational_function,
    split_equality,
    try_split_equality,
    unwrap_equality,
    wrap_equality,
    wrap_simple,
};
pub use options::{ConvertOptions, ConvertOptionsBuilder, MissingRhs};
pub use request::{DetailLevel, SolveRequest};
