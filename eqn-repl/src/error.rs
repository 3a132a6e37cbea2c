use eqn_error::Error as EqnError;

/// Utility enum to package the errors found while converting a line.
pub enum Error {
    /// The line could not be parsed, so the lenient rewrites produced the output instead.
    Parse {
        /// The text given to the parser, which may differ from the line that was typed.
        source: String,

        /// The error from the parser.
        err: EqnError,
    },

    /// The line could not be normalized into a single equation for the checker.
    Check(EqnError),
}

impl Error {
    /// Report the error to stderr, highlighting the given line of input.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Parse { source, err } => err.report_to_stderr("parse", source),
            Self::Check(err) => err.report_to_stderr("input", input),
        }
    }
}
