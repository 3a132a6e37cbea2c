//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs an error kind with the regions of the input it
//! points at.

// allows `#[derive(ErrorKind)]` to refer to `eqn_error` from within this crate's own tests
extern crate self as eqn_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error kind as [`Any`], so callers can test for a specific kind.
    fn as_any(&self) -> &dyn Any;

    /// The short, single-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the error is of the given kind.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the error kind as the given concrete type, if it is of that type.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error to stderr, highlighting the given source.
    ///
    /// The `ariadne` crate's [`Report`] type does not implement `Display`, so we can only use its
    /// `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, source: &str) {
        // a failure to write to stderr is not worth reporting anywhere else
        let _ = self.build_report(src_id).eprint((src_id, Source::from(source)));
    }

    /// Renders the report of this error into a string, including ANSI color codes.
    pub fn report_to_string(&self, src_id: &str, source: &str) -> String {
        let mut buf = Vec::new();
        let _ = self.build_report(src_id).write((src_id, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use eqn_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unexpected end of input",
        labels = ["add something here"],
        help = "the expression is incomplete",
    )]
    struct Incomplete;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("found {} equals signs", count),
        labels = ["here", "and here"],
    )]
    struct TooManyEquals {
        count: usize,
    }

    fn render(err: &Error, source: &str) -> String {
        let raw = err.report_to_string("input", source);
        String::from_utf8(strip_ansi_escapes::strip(raw.as_bytes())).unwrap()
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![3..3], Incomplete);
        let report = render(&err, "2/x");

        assert!(report.contains("unexpected end of input"));
        assert!(report.contains("add something here"));
        assert!(report.contains("the expression is incomplete"));
    }

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![1..2, 3..4], TooManyEquals { count: 2 });
        assert_eq!(err.to_string(), "found 2 equals signs");

        let report = render(&err, "x=y=z");
        assert!(report.contains("and here"));
    }

    #[test]
    fn downcast_to_kind() {
        let err = Error::new(vec![0..1], TooManyEquals { count: 3 });
        assert!(err.is::<TooManyEquals>());
        assert!(!err.is::<Incomplete>());
        assert_eq!(err.downcast_ref::<TooManyEquals>(), Some(&TooManyEquals { count: 3 }));
    }
}
