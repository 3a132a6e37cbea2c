use crate::parser::{error::Error, Parse, Parser};

/// Represents a value that is surrounded by two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surrounded<S, E, T> {
    /// The start token.
    pub start: S,

    /// The value.
    pub value: T,

    /// The end token.
    pub end: E,
}

impl<S, E, T> Parse for Surrounded<S, E, T>
where
    S: Parse,
    E: Parse,
    T: Parse,
{
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        Ok(Self {
            start: input.try_parse()?,
            value: input.try_parse()?,
            end: input.try_parse()?,
        })
    }
}
