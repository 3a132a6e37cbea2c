//! Lenient conversion from the simple shorthand.

use crate::{
    rewrite::{fixed_point, SiteRule},
    scan::PARENS,
};
use regex::Captures;
use super::{
    canonical,
    collapse_whitespace,
    operand::{operand_after, operand_before},
};

pattern!(SUPERSCRIPTS = r"[⁰¹²³⁴⁵⁶⁷⁸⁹]+");

/// Wraps each bare exponent in parentheses: `x**2` → `x**(2)`.
static EXPONENTS: SiteRule = SiteRule::new("group exponents", group_first_exponent);

/// Wraps both operands of each division in parentheses: `1/x` → `(1)/(x)`.
static DIVISIONS: SiteRule = SiteRule::new("group divisions", group_first_division);

/// Converts a superscript digit to its ASCII digit.
fn superscript_digit(c: char) -> Option<char> {
    "⁰¹²³⁴⁵⁶⁷⁸⁹"
        .chars()
        .position(|digit| digit == c)
        .and_then(|n| char::from_digit(n as u32, 10))
}

/// Replaces the unicode operators and superscripts of the shorthand with their ASCII
/// counterparts, and collapses runs of whitespace.
///
/// ```
/// use eqn_convert::lenient::normalize;
///
/// assert_eq!(normalize("6  ÷ 2 × x²"), "6 / 2 * x**(2)");
/// ```
pub fn normalize(input: &str) -> String {
    let text = input
        .replace(|c: char| c == '×' || c == '·', "*")
        .replace('÷', "/")
        .replace('−', "-");
    let text = SUPERSCRIPTS.replace_all(&text, |caps: &Captures| {
        let digits = caps[0].chars().filter_map(superscript_digit).collect::<String>();
        format!("**({})", digits)
    });
    collapse_whitespace(&text)
}

/// Returns the text wrapped in parentheses, unless it already is a single parenthesized group.
fn parenthesize(text: &str) -> String {
    if PARENS.encloses(text) {
        text.to_owned()
    } else {
        format!("({})", text)
    }
}

/// Wraps the first bare exponent in parentheses.
fn group_first_exponent(s: &str) -> Option<String> {
    s.match_indices("**").find_map(|(i, op)| {
        let exponent = operand_after(s, i + op.len(), false)?;
        let text = &s[exponent.clone()];
        if PARENS.encloses(text) {
            return None;
        }
        Some(format!("{}**({}){}", s[..i].trim_end(), text, &s[exponent.end..]))
    })
}

/// Returns true if the text ends with an operand, so that an operand written right after it is
/// an implicit product, as in `2x`.
fn ends_with_operand(text: &str) -> bool {
    text.ends_with(|c: char| c.is_alphanumeric() || c == '_' || c == '.' || c == ')')
}

/// Returns true if the text starts with an operand.
fn starts_with_operand(text: &str) -> bool {
    text.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '(')
}

/// Wraps both operands of the first division that is not grouped yet. An operand juxtaposed with
/// the quotient, like the `2` of `2x/3`, is joined to it with an explicit `*`.
fn group_first_division(s: &str) -> Option<String> {
    s.match_indices('/').find_map(|(i, _)| {
        let lhs = operand_before(s, i, true)?;
        let rhs = operand_after(s, i + 1, true)?;
        let (lhs_text, rhs_text) = (&s[lhs.clone()], &s[rhs.clone()]);
        let (prefix, suffix) = (&s[..lhs.start], &s[rhs.end..]);
        let product_before = ends_with_operand(prefix);
        let product_after = starts_with_operand(suffix);
        if PARENS.encloses(lhs_text) && PARENS.encloses(rhs_text) && !product_before && !product_after {
            return None;
        }

        Some(format!(
            "{}{}{}/{}{}{}",
            prefix,
            if product_before { "*" } else { "" },
            parenthesize(lhs_text),
            parenthesize(rhs_text),
            if product_after { "*" } else { "" },
            suffix,
        ))
    })
}

/// Rewrites the shorthand into canonical notation.
///
/// Unicode operators are normalized, `^` becomes `**` with its exponent grouped, and both operands
/// of every division are grouped. Text that cannot be rewritten, such as the dangling `/` in `2/`,
/// is kept as it is.
pub fn simple_to_canonical(input: &str) -> String {
    let text = normalize(input).replace('^', "**");
    let text = fixed_point(&EXPONENTS, &text);
    fixed_point(&DIVISIONS, &text)
}

/// Rewrites the shorthand into presentation notation, by way of the canonical notation. The `×`
/// and `÷` glyphs become `\times` and `\div` rather than a product and a fraction.
pub fn simple_to_presentation(input: &str) -> String {
    let text = input.replace('×', " \\times ").replace('÷', " \\div ");
    canonical::canonical_to_presentation(&simple_to_canonical(&text))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn unicode_operators() {
        assert_eq!(normalize("2×3·4÷5 − 1"), "2*3*4/5 - 1");
        assert_eq!(normalize("x²³"), "x**(23)");
        assert_eq!(normalize("  a \t+\n b "), "a + b");
    }

    #[test]
    fn exponents() {
        assert_eq!(simple_to_canonical("x^2 + $"), "x**(2) + $");
        assert_eq!(simple_to_canonical("x ** -1 $"), "x**(-1) $");
        assert_eq!(simple_to_canonical("2^sqrt(x) $"), "2**(sqrt(x)) $");
        assert_eq!(simple_to_canonical("(x+1)^(2) $"), "(x+1)**(2) $");
    }

    #[test]
    fn divisions() {
        assert_eq!(simple_to_canonical("1/x + ("), "(1)/(x) + (");
        assert_eq!(simple_to_canonical("a/b/c$"), "(a)/(b)/(c)$");
        assert_eq!(simple_to_canonical("(x+1)/(x-2) = 3 = 4"), "(x+1)/(x-2) = 3 = 4");
        assert_eq!(simple_to_canonical("x^2/y $"), "(x**(2))/(y) $");
    }

    #[test]
    fn products_next_to_divisions() {
        assert_eq!(simple_to_canonical("2x/3 $"), "2*(x)/(3) $");
        assert_eq!(simple_to_canonical("1/2x $"), "(1)/(2)*x $");
        assert_eq!(simple_to_canonical("2(x+1)/3 $"), "2*(x+1)/(3) $");
        assert_eq!(simple_to_canonical("2(x)/(3)(y) $"), "2*(x)/(3)*(y) $");
        assert_eq!(simple_to_canonical("f(x)/2 $"), "(f(x))/(2) $");
    }

    #[test]
    fn incomplete_input_is_kept() {
        assert_eq!(simple_to_canonical("2/"), "2/");
        assert_eq!(simple_to_canonical("2/(x+"), "2/(x+");
        assert_eq!(simple_to_canonical("(("), "((");
        assert_eq!(simple_to_canonical("x^"), "x**");
    }

    #[test]
    fn rewriting_is_idempotent() {
        for input in [
            "1/x + (",
            "a/b/c$",
            "x^2/y $",
            "2**3/4**5 $",
            "sqrt(x)/2^(1/2) $",
            "2x/3 $",
            "1/2x $",
            "2(x+1)/3y $",
        ] {
            let once = simple_to_canonical(input);
            assert_eq!(simple_to_canonical(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn presentation() {
        assert_eq!(simple_to_presentation("1/x + ("), "\\frac{1}{x} + (");
        assert_eq!(simple_to_presentation("x^2*y $"), "x^{2} \\cdot y $");
        assert_eq!(simple_to_presentation("x^2^3 $"), "x^{2^{3}} $");
    }

    #[test]
    fn presentation_keeps_glyphs() {
        assert_eq!(simple_to_presentation("6 × x + ("), "6 \\times x + (");
        assert_eq!(simple_to_presentation("6 ÷ 2 + ("), "6 \\div 2 + (");
        assert_eq!(simple_to_presentation("6÷2·x + ("), "6 \\div 2 \\cdot x + (");
    }
}
