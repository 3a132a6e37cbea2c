//! Lenient conversion from presentation markup.
//!
//! Presentation markup reaches the converter from two places: a keyboard that inserts LaTeX
//! commands, and text recognition, whose output carries artifacts such as math-mode delimiters,
//! thin spaces, and trailing lines. Both are handled here.

use crate::{
    rewrite::{fixed_point, RegexRule, SiteRule},
    scan::{BRACES, BRACKETS},
};
use eqn_parser::tokenizer::{FUNCTIONS, WORDS};
use regex::Captures;
use super::{collapse_whitespace, operand::skip_spaces};

pattern!(NOISE = r"\\displaystyle|\\textstyle|\\[,;:!]|[\u{200B}-\u{200D}\u{FEFF}]");
pattern!(UNBRACED_FRAC = r"\\frac\s*([^{\\\s])\s*([^{\\\s])");
pattern!(UNBRACED_SQRT = r"\\sqrt\s*([0-9A-Za-z])");
pattern!(TEXT_COMMAND = r"\\(?:mathrm|operatorname|text)\s*\{([^{}]*)\}");
pattern!(CONTROL_WORD = r"\\([A-Za-z]+)");
pattern!(BRACED_EXPONENT = r"\^\s*\{([^{}]*)\}");
pattern!(BARE_EXPONENT = r"\^\s*([0-9A-Za-z])");

/// `\sqrt{A}` → `sqrt(A)`, `\sqrt[n]{A}` → `root(A, n)`.
static ROOTS: SiteRule = SiteRule::new("latex roots", first_root);

/// `\frac{A}{B}` → `(A)/(B)`.
static FRACTIONS: SiteRule = SiteRule::new("latex fractions", first_fraction);

fn first_root(s: &str) -> Option<String> {
    s.match_indices("\\sqrt").find_map(|(i, command)| {
        let mut at = skip_spaces(s, i + command.len());
        let index = BRACKETS.group(s, at).map(|(index, after)| {
            at = skip_spaces(s, after);
            index.trim()
        });
        let (radicand, end) = BRACES.group(s, at)?;

        let call = match index {
            Some(index) => format!("root({}, {})", radicand.trim(), index),
            None => format!("sqrt({})", radicand.trim()),
        };
        Some(format!("{}{}{}", &s[..i], call, &s[end..]))
    })
}

/// Rewrites the first `\frac` with two complete groups. The numerator and denominator are sibling
/// groups, so each is scanned on its own, the denominator starting where the numerator ends.
///
/// A fraction raised to a power is grouped as a whole, so the exponent of `\frac{1}{x}^{2}` does
/// not bind to the denominator.
fn first_fraction(s: &str) -> Option<String> {
    s.match_indices("\\frac").find_map(|(i, command)| {
        let (numerator, after) = BRACES.group(s, skip_spaces(s, i + command.len()))?;
        let (denominator, end) = BRACES.group(s, skip_spaces(s, after))?;
        let quotient = format!("({})/({})", numerator.trim(), denominator.trim());
        if s[skip_spaces(s, end)..].starts_with('^') {
            Some(format!("{}({}){}", &s[..i], quotient, &s[end..]))
        } else {
            Some(format!("{}{}{}", &s[..i], quotient, &s[end..]))
        }
    })
}

/// Removes the artifacts commonly found in recognized LaTeX.
///
/// Only the text before the first TeX line break (`\\`) is kept, math-mode `$` delimiters are
/// dropped, `\dfrac` and `\tfrac` become `\frac`, spacing commands, `\displaystyle`, and
/// zero-width characters are removed, and whitespace is collapsed.
///
/// ```
/// use eqn_convert::lenient::clean_artifacts;
///
/// assert_eq!(clean_artifacts("$$\\dfrac{1}{x}\\,=2 \\\\ x=1/2$$"), "\\frac{1}{x}=2");
/// ```
pub fn clean_artifacts(input: &str) -> String {
    let first_line = input.split("\\\\").next().unwrap_or_default();
    let text = first_line.trim().trim_matches('$')
        .replace("\\dfrac", "\\frac")
        .replace("\\tfrac", "\\frac")
        .replace('−', "-")
        .replace('\u{A0}', " ");
    let text = NOISE.replace_all(&text, "");
    collapse_whitespace(&text)
}

/// Rewrites presentation markup into canonical notation.
pub fn presentation_to_canonical(input: &str) -> String {
    let text = clean_artifacts(input)
        .replace("\\left|", "abs(")
        .replace("\\right|", ")")
        .replace("\\left.", "")
        .replace("\\right.", "")
        .replace("\\left", "")
        .replace("\\right", "")
        .replace("\\times", "*")
        .replace("\\cdot", "*")
        .replace("\\div", "/")
        .replace('×', "*")
        .replace('÷', "/");
    let text = TEXT_COMMAND.replace_all(&text, "${1}");
    let text = UNBRACED_FRAC.replace_all(&text, "\\frac{${1}}{${2}}");
    let text = UNBRACED_SQRT.replace_all(&text, "\\sqrt{${1}}");

    let text = fixed_point(&ROOTS, &text);
    let text = fixed_point(&FRACTIONS, &text);

    let text = CONTROL_WORD.replace_all(&text, |caps: &Captures| {
        let word = &caps[1];
        let name = if word == "infty" {
            "oo"
        } else if WORDS.contains(&word) || FUNCTIONS.contains(&word) {
            word
        } else {
            return caps[0].to_owned();
        };

        // a control word ends at the first non-letter, so `\pi r` and `\sin\theta` need a space
        let end = caps.get(0).map_or(text.len(), |m| m.end());
        match text[end..].chars().next() {
            Some(c) if c.is_ascii_alphabetic() || c == '\\' => format!("{} ", name),
            _ => name.to_owned(),
        }
    });

    // innermost exponents first, since only braces without nested braces match
    let exponents = RegexRule::new("latex exponents", &BRACED_EXPONENT, |caps: &Captures| {
        format!("**({})", caps[1].trim())
    });
    let text = fixed_point(&exponents, &text);
    let text = BARE_EXPONENT.replace_all(&text, "**(${1})");

    collapse_whitespace(&text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn artifacts() {
        assert_eq!(clean_artifacts("$x = 1$"), "x = 1");
        assert_eq!(clean_artifacts("x\u{200B}+1 \\\\ junk"), "x+1");
        assert_eq!(clean_artifacts("\\displaystyle \\tfrac{1}{2}\\;x"), "\\frac{1}{2}x");
        assert_eq!(clean_artifacts("2 − x"), "2 - x");
    }

    #[test]
    fn nested_fractions() {
        assert_eq!(presentation_to_canonical("\\frac{\\frac{1}{x}}{2}"), "((1)/(x))/(2)");
        assert_eq!(presentation_to_canonical("\\frac{1}{\\frac{1}{x}}"), "(1)/((1)/(x))");
        assert_eq!(presentation_to_canonical("\\frac12"), "(1)/(2)");
    }

    #[test]
    fn fraction_raised_to_a_power() {
        assert_eq!(presentation_to_canonical("\\frac{1}{x}^{2}"), "((1)/(x))**(2)");
        assert_eq!(presentation_to_canonical("\\frac{1}{x}+y^{2}"), "(1)/(x)+y**(2)");
    }

    #[test]
    fn roots() {
        assert_eq!(presentation_to_canonical("\\sqrt[3]{x}+\\sqrt{2}"), "root(x, 3)+sqrt(2)");
        assert_eq!(presentation_to_canonical("\\sqrt{\\sqrt{x}}"), "sqrt(sqrt(x))");
        assert_eq!(presentation_to_canonical("\\sqrt x"), "sqrt(x)");
    }

    #[test]
    fn exponents() {
        assert_eq!(presentation_to_canonical("\\left(x+1\\right)^{2}"), "(x+1)**(2)");
        assert_eq!(presentation_to_canonical("x^{2^{3}}"), "x**(2**(3))");
        assert_eq!(presentation_to_canonical("e^x"), "e**(x)");
    }

    #[test]
    fn operators_and_words() {
        assert_eq!(presentation_to_canonical("2\\cdot\\pi r"), "2*pi r");
        assert_eq!(presentation_to_canonical("6 \\div 2 \\times x"), "6 / 2 * x");
        assert_eq!(presentation_to_canonical("\\left|x\\right|"), "abs(x)");
        assert_eq!(presentation_to_canonical("\\sin\\theta"), "sin theta");
        assert_eq!(presentation_to_canonical("\\infty"), "oo");
        assert_eq!(presentation_to_canonical("\\mathrm{foo}(x)"), "foo(x)");
    }

    #[test]
    fn unbalanced_input_is_kept() {
        assert_eq!(presentation_to_canonical("\\frac{1}{"), "\\frac{1}{");
        assert_eq!(presentation_to_canonical("\\sqrt{x"), "\\sqrt{x");
        assert_eq!(presentation_to_canonical(""), "");
    }
}
