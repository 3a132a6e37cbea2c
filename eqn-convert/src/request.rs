//! The payload sent to the solver and checker, such as
//! `{"equation": "Eq((2)/(x), 5)", "detailLevel": "raw"}`.

use crate::convert::Converter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much of the working the solver should return.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DetailLevel {
    /// Only the solutions.
    #[default]
    Raw,

    /// Every step taken to reach the solutions.
    Process,

    /// The solutions, along with the shortcut that leads to them.
    Shortcut,
}

/// A request to solve or check an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SolveRequest {
    /// The equation in canonical notation.
    pub equation: String,

    /// How much of the working to return.
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail_level: DetailLevel,
}

impl SolveRequest {
    /// Creates a request for an equation already in canonical notation.
    pub fn new(equation: impl Into<String>) -> Self {
        Self {
            equation: equation.into(),
            detail_level: DetailLevel::default(),
        }
    }

    /// Sets the detail level of the request.
    pub fn with_detail_level(mut self, detail_level: DetailLevel) -> Self {
        self.detail_level = detail_level;
        self
    }

    /// Creates a request from an equation typed in the simple shorthand, wrapping it as
    /// `Eq(lhs, rhs)` if it is an equation.
    pub fn from_simple(converter: &Converter, input: &str) -> Self {
        let equation = converter
            .wrap_simple(input)
            .unwrap_or_else(|| converter.simple_to_canonical(input));
        Self::new(equation)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn from_simple() {
        let converter = Converter::default();
        assert_eq!(
            SolveRequest::from_simple(&converter, "2/x = 5"),
            SolveRequest::new("Eq((2)/(x), 5)"),
        );
        assert_eq!(
            SolveRequest::from_simple(&converter, "x^2").with_detail_level(DetailLevel::Process),
            SolveRequest {
                equation: "x**(2)".to_string(),
                detail_level: DetailLevel::Process,
            },
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn wire_format() {
        let request = SolveRequest::new("Eq((2)/(x), 5)").with_detail_level(DetailLevel::Shortcut);
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"equation":"Eq((2)/(x), 5)","detailLevel":"shortcut"}"#);

        let parsed: SolveRequest = serde_json::from_str(r#"{"equation":"x"}"#).unwrap();
        assert_eq!(parsed, SolveRequest::new("x"));
    }
}
