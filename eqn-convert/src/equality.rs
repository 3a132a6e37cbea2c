//! Splitting, building, and unwrapping equation wrappers such as `Eq(lhs, rhs)`.
//!
//! The two sides of a wrapper are separated by the first comma at parenthesis depth 0, so the
//! comma in `Eq(x, f(x, y))` that separates the arguments of `f` is never mistaken for the
//! separator between the sides.

use crate::{convert::Converter, options::MissingRhs, scan::PARENS};

/// Splits the content of an equation wrapper at its first top-level comma, returning both sides
/// trimmed.
///
/// Returns [`None`] if there is no top-level comma.
pub fn try_split_equality(content: &str) -> Option<(String, String)> {
    let comma = PARENS.find_top_level(content, ',')?;
    Some((
        content[..comma].trim().to_owned(),
        content[comma + 1..].trim().to_owned(),
    ))
}

/// Splits the content of an equation wrapper at its first top-level comma, returning both sides
/// trimmed.
///
/// If there is no top-level comma, the whole content is the left-hand side, and the right-hand
/// side is `0`.
///
/// ```
/// use eqn_convert::split_equality;
///
/// assert_eq!(split_equality("x, f(x,y)"), ("x".to_string(), "f(x,y)".to_string()));
/// assert_eq!(split_equality("x + 1"), ("x + 1".to_string(), "0".to_string()));
/// ```
pub fn split_equality(content: &str) -> (String, String) {
    try_split_equality(content).unwrap_or_else(|| (content.trim().to_owned(), "0".to_owned()))
}

impl Converter {
    /// Returns the content of the equation wrapper, if the whole text is one.
    fn wrapper_content<'a>(&self, text: &'a str) -> Option<&'a str> {
        let rest = text
            .trim()
            .strip_prefix(self.options().wrapper.as_str())?
            .trim_start();
        PARENS.encloses(rest).then(|| &rest[1..rest.len() - 1])
    }

    /// Splits an equation wrapper into its two sides, following the
    /// [`missing_rhs`](crate::ConvertOptions::missing_rhs) policy when it holds a single
    /// expression.
    pub(crate) fn split_wrapper(&self, text: &str) -> Option<(String, String)> {
        let content = self.wrapper_content(text)?;
        match self.options().missing_rhs {
            MissingRhs::Zero => Some(split_equality(content)),
            MissingRhs::Keep => try_split_equality(content),
        }
    }

    /// Builds the wrapped form of an equation, such as `Eq(lhs, rhs)`.
    ///
    /// Returns [`None`] if either side is empty, or has a top-level comma that would add a third
    /// argument to the wrapper.
    pub fn wrap_equality(&self, lhs: &str, rhs: &str) -> Option<String> {
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        if lhs.is_empty() || rhs.is_empty() {
            return None;
        }
        if [lhs, rhs].iter().any(|side| PARENS.find_top_level(side, ',').is_some()) {
            return None;
        }
        Some(format!("{}({}, {})", self.options().wrapper, lhs, rhs))
    }

    /// Converts an equation in the simple shorthand to its wrapped canonical form.
    ///
    /// Returns [`None`] unless the converted equation has exactly one top-level `=`, with an
    /// expression on both sides that [`wrap_equality`](Self::wrap_equality) accepts.
    pub fn wrap_simple(&self, input: &str) -> Option<String> {
        let canonical = self.simple_to_canonical(input);
        let equals = PARENS.find_all_top_level(&canonical, '=');
        let [equals] = equals.as_slice() else {
            return None;
        };
        self.wrap_equality(&canonical[..*equals], &canonical[*equals + 1..])
    }

    /// Rewrites an equation wrapper as `lhs = rhs`.
    ///
    /// Returns [`None`] if the text is not an equation wrapper.
    pub fn unwrap_equality(&self, text: &str) -> Option<String> {
        self.split_wrapper(text)
            .map(|(lhs, rhs)| format!("{} = {}", lhs, rhs))
    }

    /// Returns the right-hand side of a wrapped or bare equation, or the whole text if it is not
    /// an equation.
    pub fn rational_function(&self, text: &str) -> String {
        if let Some(content) = self.wrapper_content(text) {
            return try_split_equality(content)
                .map_or_else(|| content.trim().to_owned(), |(_, rhs)| rhs);
        }

        let text = text.trim();
        match PARENS.find_top_level(text, '=') {
            Some(equals) => text[equals + 1..].trim().to_owned(),
            None => text.to_owned(),
        }
    }
}

/// Builds the wrapped form of an equation with the default wrapper, `Eq(lhs, rhs)`.
pub fn wrap_equality(lhs: &str, rhs: &str) -> Option<String> {
    Converter::default().wrap_equality(lhs, rhs)
}

/// Converts an equation in the simple shorthand to its wrapped canonical form, using the default
/// options.
pub fn wrap_simple(input: &str) -> Option<String> {
    Converter::default().wrap_simple(input)
}

/// Rewrites an `Eq(lhs, rhs)` wrapper as `lhs = rhs`.
pub fn unwrap_equality(text: &str) -> Option<String> {
    Converter::default().unwrap_equality(text)
}

/// Returns the right-hand side of a wrapped or bare equation, or the whole text if it is not an
/// equation.
pub fn rational_function(text: &str) -> String {
    Converter::default().rational_function(text)
}
