//! Lenient conversion from the canonical notation.

use crate::{
    rewrite::{fixed_point, RegexRule, SiteRule},
    scan::PARENS,
};
use regex::Captures;
use super::{collapse_whitespace, operand::{operand_after, operand_before}};

pattern!(SQRT_CALL = r"\bsqrt\(");
pattern!(MUL = r"\s*\*\s*");
pattern!(ATOM_BEFORE_SLASH = r"(^|[^\w.])\(([\w.]+)\)\s*/");
pattern!(ATOM_AFTER_SLASH = r"/\s*\(([\w.]+)\)");
pattern!(ATOM_EXPONENT = r"\^\s*\(([\w.]+)\)");

/// `sqrt(A)` → `\sqrt{A}`.
static ROOTS: SiteRule = SiteRule::new("sqrt to latex", first_sqrt_to_latex);

/// `A**(e)` → `A^{e}`.
static POWERS: SiteRule = SiteRule::new("powers to latex", first_power_to_latex);

/// `(A)/(B)` → `\frac{A}{B}`.
static FRACTIONS: SiteRule = SiteRule::new("fractions to latex", first_fraction_to_latex);

fn first_sqrt_to_latex(s: &str) -> Option<String> {
    SQRT_CALL.find_iter(s).find_map(|m| {
        let (radicand, end) = PARENS.group(s, m.end() - 1)?;
        Some(format!("{}\\sqrt{{{}}}{}", &s[..m.start()], radicand.trim(), &s[end..]))
    })
}

/// Rewrites the last power, so the exponent of a chain is built from the inside out.
fn first_power_to_latex(s: &str) -> Option<String> {
    s.rmatch_indices("**").find_map(|(i, op)| {
        let exponent = operand_after(s, i + op.len(), false)?;
        let power = PARENS.strip(&s[exponent.clone()]);
        let (head, rest) = (s[..i].trim_end(), &s[exponent.end..]);

        // in `a**(b)**(c)`, the base `b` is itself an exponent, and becomes `a**(b^{c})`
        if let Some(base) = operand_before(head, head.len(), false) {
            if head[..base.start].trim_end().ends_with("**") {
                return Some(format!(
                    "{}({}^{{{}}}){}",
                    &head[..base.start],
                    PARENS.strip(&head[base.clone()]),
                    power,
                    rest,
                ));
            }
        }
        Some(format!("{}^{{{}}}{}", head, power, rest))
    })
}

fn first_fraction_to_latex(s: &str) -> Option<String> {
    s.match_indices('/').find_map(|(i, _)| {
        let lhs = operand_before(s, i, true)?;
        let rhs = operand_after(s, i + 1, true)?;
        Some(format!(
            "{}\\frac{{{}}}{{{}}}{}",
            &s[..lhs.start],
            PARENS.strip(&s[lhs.clone()]),
            PARENS.strip(&s[rhs.clone()]),
            &s[rhs.end..],
        ))
    })
}

/// Rewrites canonical notation into presentation notation: `sqrt(A)` becomes `\sqrt{A}`, powers
/// become `^{e}`, quotients become `\frac{A}{B}`, and `*` becomes `\cdot`.
pub fn canonical_to_presentation(input: &str) -> String {
    let text = collapse_whitespace(input);
    let text = fixed_point(&ROOTS, &text);
    let text = fixed_point(&POWERS, &text);
    let text = fixed_point(&FRACTIONS, &text);

    // a `**` with no exponent is left over from incomplete input
    let text = text.replace("**", "^");
    MUL.replace_all(&text, " \\cdot ").into_owned()
}

/// Rewrites canonical notation into the simple shorthand: powers become `^`, and the parentheses
/// around single numbers and names next to `/` and `^` are dropped.
pub fn canonical_to_simple(input: &str) -> String {
    let text = collapse_whitespace(input).replace("**", "^");

    let before_slash = RegexRule::new("bare numerator", &ATOM_BEFORE_SLASH, |caps: &Captures| {
        format!("{}{}/", &caps[1], &caps[2])
    });
    let after_slash = RegexRule::new("bare denominator", &ATOM_AFTER_SLASH, |caps: &Captures| {
        format!("/{}", &caps[1])
    });
    let exponent = RegexRule::new("bare exponent", &ATOM_EXPONENT, |caps: &Captures| {
        format!("^{}", &caps[1])
    });

    let text = fixed_point(&before_slash, &text);
    let text = fixed_point(&after_slash, &text);
    fixed_point(&exponent, &text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn roots_powers_fractions() {
        assert_eq!(canonical_to_presentation("sqrt(x)/2 + $"), "\\frac{\\sqrt{x}}{2} + $");
        assert_eq!(canonical_to_presentation("x**(2)*y $"), "x^{2} \\cdot y $");
        assert_eq!(canonical_to_presentation("(x+1)**(2) $"), "(x+1)^{2} $");
    }

    #[test]
    fn power_chains_nest() {
        assert_eq!(canonical_to_presentation("x**(2)**(3) $"), "x^{2^{3}} $");
        assert_eq!(canonical_to_presentation("2**(x)**(y)**(z) $"), "2^{x^{y^{z}}} $");
        assert_eq!(canonical_to_presentation("(x**(2))**(3) $"), "(x^{2})^{3} $");
    }

    #[test]
    fn nested_fractions() {
        assert_eq!(canonical_to_presentation("((1)/(x))/(2) $"), "\\frac{\\frac{1}{x}}{2} $");
    }

    #[test]
    fn incomplete_canonical() {
        assert_eq!(canonical_to_presentation("sqrt(x"), "sqrt(x");
        assert_eq!(canonical_to_presentation("x**"), "x^");
        assert_eq!(canonical_to_presentation("(1)/("), "(1)/(");
    }

    #[test]
    fn to_simple() {
        assert_eq!(canonical_to_simple("(1)/(x)+(x+1)**(2) $"), "1/x+(x+1)^2 $");
        assert_eq!(canonical_to_simple("f(x)/(2) $"), "f(x)/2 $");
        assert_eq!(canonical_to_simple("(-1)/(x) $"), "(-1)/x $");
        assert_eq!(canonical_to_simple("((1)/(x))/(2) $"), "(1/x)/2 $");
    }
}
