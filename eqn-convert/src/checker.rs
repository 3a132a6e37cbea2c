//! Normalization of equations for the answer checker.
//!
//! The checker accepts exactly one `lhs = rhs` equation with explicit operators. Its input can be
//! shorthand typed by the user, LaTeX recognized from an image, or a wrapped canonical equation,
//! so [`to_checker_equation`] accepts all three, along with two looser forms found in
//! recognized text: a comma standing in for `=`, as in `x + 1, 3`, and a bracket equation
//! scaled by outer factors, as in `2[x + 1 = 3]`.

use ariadne::Fmt;
use eqn_attrs::ErrorKind;
use eqn_error::{Error, EXPR};
use crate::{
    convert::Converter,
    lenient::clean_artifacts,
    scan::{BRACKETS, PARENS},
};
use std::ops::Range;

/// The input was empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty equation",
    labels = [format!("add an {} here", "equation".fg(EXPR))],
)]
pub struct EmptyEquation;

/// The input had no `=`, so it is an expression rather than an equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `=`",
    labels = ["this is an expression, not an equation"],
    help = format!("add `=` and a right-hand side to the {}", "expression".fg(EXPR)),
)]
pub struct MissingEquals;

/// The input had more than one top-level `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("an equation can only have one `=`, but {} were found", count),
    labels = vec![""; *count],
    help = "remove the extra `=`, or check the equations one at a time",
)]
pub struct TooManyEquals {
    /// The number of `=` found.
    pub count: usize,
}

/// One side of the `=` was empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing side of the equation",
    labels = [format!("add an {} on both sides of this `=`", "expression".fg(EXPR))],
)]
pub struct MissingSide;

/// A top-level comma was left on one side of the `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a comma cannot appear on either side of the `=`",
    labels = ["this comma"],
    help = format!("write each side as a single {}", "expression".fg(EXPR)),
)]
pub struct UnexpectedComma;

/// Returns the spans of every `=` in the input, or the whole input if there are none.
fn equals_spans(input: &str) -> Vec<Range<usize>> {
    let spans = input.match_indices('=')
        .map(|(i, _)| i..i + 1)
        .collect::<Vec<_>>();
    if spans.is_empty() {
        vec![0..input.len()]
    } else {
        spans
    }
}

/// Returns the spans of every top-level comma in the input, or the whole input if there are none.
fn comma_spans(input: &str) -> Vec<Range<usize>> {
    let spans = PARENS.find_all_top_level(input, ',')
        .into_iter()
        .map(|i| i..i + 1)
        .collect::<Vec<_>>();
    if spans.is_empty() {
        vec![0..input.len()]
    } else {
        spans
    }
}

/// Normalizes a factor written outside a bracket equation. Unmatched parentheses left over from
/// recognition are removed, and redundant nested parentheses are collapsed.
fn bracket_factor(raw: &str) -> String {
    let factor = raw.trim()
        .trim_start_matches(')')
        .trim_end_matches('(')
        .trim();
    if !PARENS.encloses(factor) {
        return factor.to_owned();
    }

    let inner = PARENS.strip(factor);
    if inner.chars().all(|c| c.is_alphanumeric() || c == '.') {
        inner.to_owned()
    } else {
        format!("({})", inner)
    }
}

/// Expands a bracket equation `A[lhs = rhs]B` into `T*(lhs) = T*(rhs)`, where `T` is the product
/// of the factors outside the bracket, or `1` if there are none.
///
/// A bracket that is never closed extends to the first `)` if the `=` comes before it, and to
/// the end of the text otherwise. Returns [`None`] if there is no bracket containing an `=`.
fn expand_bracket_equation(text: &str) -> Option<String> {
    let open = text.find('[')?;
    let (inner, postfix) = match BRACKETS.matching_close(text, open) {
        Some(close) => (&text[open + 1..close], &text[close + 1..]),
        None => match text[open + 1..].find(')').map(|i| open + 1 + i) {
            Some(paren) if text[open + 1..paren].contains('=') => {
                (&text[open + 1..paren], &text[paren + 1..])
            },
            _ => (&text[open + 1..], ""),
        },
    };
    let equals = PARENS.find_top_level(inner, '=')?;

    let factors = [&text[..open], postfix]
        .into_iter()
        .map(bracket_factor)
        .filter(|factor| !factor.is_empty())
        .collect::<Vec<_>>();
    let total = if factors.is_empty() {
        "1".to_owned()
    } else {
        factors.join("*")
    };

    Some(format!(
        "{total}*({}) = {total}*({})",
        inner[..equals].trim(),
        inner[equals + 1..].trim(),
        total = total,
    ))
}

impl Converter {
    /// Normalizes shorthand, LaTeX, or a wrapped canonical equation into a single `lhs = rhs`
    /// equation in canonical notation, as accepted by the answer checker.
    ///
    /// Returns an error if the input is empty, or does not contain exactly one top-level `=`
    /// with a single expression on each side.
    pub fn to_checker_equation(&self, input: &str) -> Result<String, Error> {
        let text = input.trim();
        if text.is_empty() {
            return Err(Error::new(vec![0..input.len()], EmptyEquation));
        }

        let text = if text.contains('\\') {
            self.presentation_to_canonical(text)
        } else {
            clean_artifacts(text)
        };
        let mut text = self.unwrap_equality(&text).unwrap_or(text);

        if !text.contains('=') {
            let segments = PARENS.top_level_segments(&text, ',');
            if segments.len() > 1 {
                text = segments.iter()
                    .map(|segment| segment.trim())
                    .collect::<Vec<_>>()
                    .join(" = ");
            }
        }

        let text = expand_bracket_equation(&text).unwrap_or(text);

        let equals = PARENS.find_all_top_level(&text, '=');
        let split = match equals.as_slice() {
            [] => return Err(Error::new(vec![0..input.len()], MissingEquals)),
            [split] => *split,
            _ => return Err(Error::new(equals_spans(input), TooManyEquals { count: equals.len() })),
        };

        let (lhs, rhs) = (text[..split].trim(), text[split + 1..].trim());
        if lhs.is_empty() || rhs.is_empty() {
            return Err(Error::new(equals_spans(input), MissingSide));
        }
        if [lhs, rhs].iter().any(|side| PARENS.find_top_level(side, ',').is_some()) {
            return Err(Error::new(comma_spans(input), UnexpectedComma));
        }

        Ok(format!("{} = {}", self.simple_to_canonical(lhs), self.simple_to_canonical(rhs)))
    }
}

/// Normalizes an equation for the answer checker, using the default options. See
/// [`Converter::to_checker_equation`].
///
/// ```
/// use eqn_convert::to_checker_equation;
///
/// assert_eq!(to_checker_equation("2x + 1 = 5").unwrap(), "2*x+1 = 5");
/// assert_eq!(to_checker_equation("2[x+1=3]").unwrap(), "2*(x+1) = 2*(3)");
/// assert!(to_checker_equation("x + 1").is_err());
/// ```
pub fn to_checker_equation(input: &str) -> Result<String, Error> {
    Converter::default().to_checker_equation(input)
}

#[cfg(test)]
mod tests {
    use crate::options::{ConvertOptions, MissingRhs};
    use pretty_assertions::assert_eq;
    use super::*;

    fn check(input: &str) -> String {
        match to_checker_equation(input) {
            Ok(equation) => equation,
            Err(err) => panic!("`{}` failed: {}", input, err),
        }
    }

    #[test]
    fn shorthand() {
        assert_eq!(check("2x + 1 = 5"), "2*x+1 = 5");
        assert_eq!(check("1/x = x²"), "(1)/(x) = x**(2)");
    }

    #[test]
    fn latex() {
        assert_eq!(check("$\\frac{1}{x}=2$"), "(1)/(x) = 2");
        assert_eq!(check("\\dfrac{x+1}{x-2}=3 \\\\ x=7"), "(x+1)/(x-2) = 3");
    }

    #[test]
    fn wrapped() {
        assert_eq!(check("Eq((x+1)/(x-2), 3)"), "(x+1)/(x-2) = 3");
        assert_eq!(check("Eq(x+1)"), "x+1 = 0");
    }

    #[test]
    fn comma_as_equals() {
        assert_eq!(check("x+1, 3"), "x+1 = 3");
        assert_eq!(check("root(x, 3), 2"), "root(x, 3) = 2");
    }

    #[test]
    fn bracket_equations() {
        assert_eq!(check("2[x+1=3]"), "2*(x+1) = 2*(3)");
        assert_eq!(check("[x = 1]"), "1*(x) = 1*(1)");
        assert_eq!(check("((x-1))[x=2]"), "(x-1)*(x) = (x-1)*(2)");
        assert_eq!(check("(x-1)[x=2)(x-1)"), "(x-1)*(x-1)*(x) = (x-1)*(x-1)*(2)");
        assert_eq!(check("3[x = 4"), "3*(x) = 3*(4)");
    }

    #[test]
    fn empty() {
        for input in ["", "   "] {
            let err = to_checker_equation(input).unwrap_err();
            assert!(err.is::<EmptyEquation>());
        }
    }

    #[test]
    fn missing_equals() {
        let err = to_checker_equation("x + 1").unwrap_err();
        assert!(err.is::<MissingEquals>());
        assert_eq!(err.spans, vec![0..5]);

        let keep = Converter::new(ConvertOptions {
            missing_rhs: MissingRhs::Keep,
            ..Default::default()
        });
        assert!(keep.to_checker_equation("Eq(x+1)").unwrap_err().is::<MissingEquals>());
    }

    #[test]
    fn too_many_equals() {
        let err = to_checker_equation("x = 1 = 2").unwrap_err();
        assert_eq!(err.downcast_ref::<TooManyEquals>(), Some(&TooManyEquals { count: 2 }));
        assert_eq!(err.spans, vec![2..3, 6..7]);
        assert_eq!(err.to_string(), "an equation can only have one `=`, but 2 were found");
    }

    #[test]
    fn missing_side() {
        let err = to_checker_equation("= 3").unwrap_err();
        assert!(err.is::<MissingSide>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn comma_beside_equals() {
        let err = to_checker_equation("1/x = 2, 3").unwrap_err();
        assert!(err.is::<UnexpectedComma>());
        assert_eq!(err.spans, vec![7..8]);

        assert!(to_checker_equation("a, b = 1").unwrap_err().is::<UnexpectedComma>());
        assert_eq!(check("root(x, 3) = 2"), "root(x, 3) = 2");
    }

    #[test]
    fn report() {
        let err = to_checker_equation("x = 1 = 2").unwrap_err();
        let raw = err.report_to_string("input", "x = 1 = 2");
        let report = String::from_utf8(strip_ansi_escapes::strip(raw.as_bytes())).unwrap();
        assert!(report.contains("an equation can only have one `=`"));
        assert!(report.contains("check the equations one at a time"));
    }
}
