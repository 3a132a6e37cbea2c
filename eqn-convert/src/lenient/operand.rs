//! Finds the operands on either side of an operator, without parsing.
//!
//! An operand is the text adjacent to an operator that binds at least as tightly as a quotient:
//! a number, a name, a parenthesized group, a function call such as `sqrt(x)`, or a LaTeX command
//! with its groups such as `\frac{1}{x}`. When powers are included, a chain of `**` or `^`
//! exponents after the operand belongs to it as well.
//!
//! Every function returns [`None`] when the operand is missing or its delimiters are unbalanced,
//! and the caller then leaves the operator alone.

use crate::scan::{BRACES, BRACKETS, PARENS};
use std::ops::Range;

/// Returns true if the character can appear in a name after its first letter.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if the character can start a name.
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if the character can appear in a number.
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Returns true if a `+` or `-` sign starts at `i`.
fn starts_with_sign(s: &str, i: usize) -> bool {
    s.get(i..).is_some_and(|rest| rest.starts_with(|c: char| c == '-' || c == '+'))
}

/// Returns the index of the first non-space character at or after `i`.
pub fn skip_spaces(s: &str, i: usize) -> usize {
    s.get(i..).map_or(i, |rest| i + rest.len() - rest.trim_start_matches(' ').len())
}

/// Returns the index just past the last non-space character before `i`.
fn skip_spaces_back(s: &str, i: usize) -> usize {
    s.get(..i).map_or(i, |head| head.trim_end_matches(' ').len())
}

/// Returns the end of the single operand starting at `start`, without any exponents.
fn atom_end(s: &str, start: usize) -> Option<usize> {
    let rest = s.get(start..)?;
    match rest.chars().next()? {
        '(' => PARENS.matching_close(s, start).map(|close| close + 1),
        '{' => BRACES.matching_close(s, start).map(|close| close + 1),
        '\\' => {
            let name = &rest[1..];
            let name_len = name.len() - name.trim_start_matches(|c: char| c.is_ascii_alphabetic()).len();
            if name_len == 0 {
                return None;
            }

            let mut end = start + 1 + name_len;
            if let Some(close) = BRACKETS.matching_close(s, end) {
                end = close + 1;
            }
            while let Some(close) = BRACES.matching_close(s, end) {
                end = close + 1;
            }
            Some(end)
        },
        c if is_number_char(c) => Some(start + rest.len() - rest.trim_start_matches(is_number_char).len()),
        c if is_name_start(c) => {
            let end = start + rest.len() - rest.trim_start_matches(is_name_char).len();
            if s[end..].starts_with('(') {
                // function call
                PARENS.matching_close(s, end).map(|close| close + 1)
            } else {
                Some(end)
            }
        },
        _ => None,
    }
}

/// Returns the start of the name directly before `end`, or `end` if there is none.
fn name_start(s: &str, end: usize) -> usize {
    let head = &s[..end];
    let run_start = head.trim_end_matches(is_name_char).len();
    match head[run_start..].find(is_name_start) {
        Some(offset) => run_start + offset,
        None => end,
    }
}

/// Returns the start of the single operand ending at `end`, without any exponents.
fn atom_start(s: &str, end: usize) -> Option<usize> {
    let head = s.get(..end)?;
    match head.chars().next_back()? {
        ')' => {
            let open = PARENS.matching_open(s, end - 1)?;
            Some(name_start(s, open))
        },
        '}' => {
            let mut start = BRACES.matching_open(s, end - 1)?;
            while s[..start].ends_with('}') {
                start = BRACES.matching_open(s, start - 1)?;
            }
            if s[..start].ends_with(']') {
                start = BRACKETS.matching_open(s, start - 1)?;
            }

            let command = s[..start].trim_end_matches(|c: char| c.is_ascii_alphabetic()).len();
            if command < start && s[..command].ends_with('\\') {
                start = command - 1;
            }
            Some(start)
        },
        c if is_name_char(c) || c == '.' => {
            let run_start = head.trim_end_matches(|c: char| is_name_char(c) || c == '.').len();
            let run = &head[run_start..];
            let start = match run.find(is_name_start) {
                // `2x` is a product, and only `x` is the operand
                Some(offset) => run_start + offset,
                None => run_start,
            };

            if s[..start].ends_with('\\') {
                Some(start - 1)
            } else {
                Some(start)
            }
        },
        _ => None,
    }
}

/// Returns the index just past the power operator starting at `i`, if there is one.
fn power_operator_end(s: &str, i: usize) -> Option<usize> {
    let rest = s.get(i..)?;
    if rest.starts_with("**") {
        Some(i + 2)
    } else if rest.starts_with('^') {
        Some(i + 1)
    } else {
        None
    }
}

/// Returns the operand that starts after `from`, skipping spaces. A leading sign is part of the
/// operand, as in the `-1` of `x**-1`.
pub fn operand_after(s: &str, from: usize, powers: bool) -> Option<Range<usize>> {
    let start = skip_spaces(s, from);
    let mut atom = start;
    if starts_with_sign(s, start) {
        atom = skip_spaces(s, start + 1);
    }
    let mut end = atom_end(s, atom)?;

    if powers {
        while let Some(op_end) = power_operator_end(s, skip_spaces(s, end)) {
            let mut exponent = skip_spaces(s, op_end);
            if starts_with_sign(s, exponent) {
                exponent += 1;
            }
            match atom_end(s, exponent) {
                Some(exponent_end) => end = exponent_end,
                None => break,
            }
        }
    }

    Some(start..end)
}

/// Returns the operand that ends before `until`, skipping spaces. A leading sign is not part of
/// the operand, since `-x/2` is `-(x/2)`.
pub fn operand_before(s: &str, until: usize, powers: bool) -> Option<Range<usize>> {
    let end = skip_spaces_back(s, until);
    let mut start = atom_start(s, end)?;

    if powers {
        loop {
            let head = s[..start].trim_end_matches(' ');
            let op_start = if head.ends_with("**") {
                head.len() - 2
            } else if head.ends_with('^') {
                head.len() - 1
            } else {
                break;
            };

            match atom_start(s, skip_spaces_back(s, op_start)) {
                Some(base) => start = base,
                None => break,
            }
        }
    }

    Some(start..end)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Returns the operands around the first occurrence of `op`.
    fn around<'s>(s: &'s str, op: &str, powers: bool) -> (Option<&'s str>, Option<&'s str>) {
        let i = s.find(op).unwrap();
        (
            operand_before(s, i, powers).map(|range| &s[range]),
            operand_after(s, i + op.len(), powers).map(|range| &s[range]),
        )
    }

    #[test]
    fn plain_operands() {
        assert_eq!(around("1/x", "/", true), (Some("1"), Some("x")));
        assert_eq!(around("a + 12 / 3.5 - b", "/", true), (Some("12"), Some("3.5")));
        assert_eq!(around("2x/3", "/", true), (Some("x"), Some("3")));
    }

    #[test]
    fn groups_and_calls() {
        assert_eq!(around("(x+1)/(x-2)", "/", true), (Some("(x+1)"), Some("(x-2)")));
        assert_eq!(around("sqrt(x)/abs(y)", "/", true), (Some("sqrt(x)"), Some("abs(y)")));
        assert_eq!(around("2(x+1)/3", "/", true), (Some("(x+1)"), Some("3")));
    }

    #[test]
    fn signed_right_operand() {
        assert_eq!(around("1/-x", "/", true), (Some("1"), Some("-x")));
        assert_eq!(around("-x/2", "/", true), (Some("x"), Some("2")));
    }

    #[test]
    fn power_chains() {
        assert_eq!(around("x**(2)/y**3", "/", true), (Some("x**(2)"), Some("y**3")));
        assert_eq!(around("x**(2)/y**3", "/", false), (Some("(2)"), Some("y")));
        assert_eq!(around("a^{2}/b", "/", true), (Some("a^{2}"), Some("b")));
    }

    #[test]
    fn latex_commands() {
        assert_eq!(around("\\frac{1}{x}/2", "/", true), (Some("\\frac{1}{x}"), Some("2")));
        assert_eq!(around("\\sqrt[3]{x}/\\pi", "/", true), (Some("\\sqrt[3]{x}"), Some("\\pi")));
    }

    #[test]
    fn missing_or_unbalanced() {
        assert_eq!(around("2/", "/", true), (Some("2"), None));
        assert_eq!(around("/x", "/", true), (None, Some("x")));
        assert_eq!(around("2/(x+", "/", true), (Some("2"), None));
        assert_eq!(around("x+1)/2", "/", true), (None, Some("2")));
        assert_eq!(around("2/sqrt(x", "/", true), (Some("2"), None));
    }
}
