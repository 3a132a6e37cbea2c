use crate::parser::{error::Error, Parse, Parser};
use std::marker::PhantomData;

/// Represents zero or more values that are delimited by a certain token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimited<D, T> {
    /// The values.
    pub values: Vec<T>,

    /// Marker type to allow using `D` as a type parameter.
    delimiter: PhantomData<D>,
}

impl<D, T> Parse for Delimited<D, T>
where
    D: Parse,
    T: Parse,
{
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut values = Vec::new();

        // catch errors manually so we can parse zero values
        while let Ok(value) = input.try_parse() {
            values.push(value);

            if input.try_parse::<D>().is_err() {
                break;
            }
        }

        Ok(Self { values, delimiter: PhantomData })
    }
}
