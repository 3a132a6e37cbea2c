use eqn_parser::parser::fmt::{LatexOptions, MulGlyph};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that control the conversions of a [`Converter`].
///
/// [`Converter`]: crate::Converter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvertOptions {
    /// The name of the function that wraps an equation in canonical notation, such as the `Eq` in
    /// `Eq(x + 1, 2)`.
    ///
    /// The default is `Eq`.
    pub wrapper: String,

    /// The glyph used for multiplication written as `*` when printing presentation markup.
    ///
    /// Multiplication written as `×` is always printed as `\times`, and implicit multiplication,
    /// as in `2x`, is printed by placing the factors side by side.
    pub mul: MulGlyph,

    /// What to do when an equation wrapper contains a single expression instead of two. See
    /// [`MissingRhs`] for more information.
    pub missing_rhs: MissingRhs,

    /// Whether to strip a leading function definition, such as the `f(x) =` in `f(x) = 2x + 1`,
    /// from the simple shorthand.
    ///
    /// The default is `true`.
    pub strip_function_prefix: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            wrapper: "Eq".to_string(),
            mul: MulGlyph::default(),
            missing_rhs: MissingRhs::default(),
            strip_function_prefix: true,
        }
    }
}

impl ConvertOptions {
    /// Wraps the given [`ConvertOptions`] into a builder for further customization.
    pub fn into_builder(self) -> ConvertOptionsBuilder {
        ConvertOptionsBuilder(self)
    }

    /// Returns the options used to print presentation markup.
    pub fn latex(&self) -> LatexOptions {
        LatexOptions { mul: self.mul }
    }
}

/// What to do when an equation wrapper, such as `Eq(x + 1)`, has no top-level comma separating
/// its two sides.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MissingRhs {
    /// The whole content is the left-hand side, and the right-hand side is `0`. `Eq(x + 1)` is
    /// read as `x + 1 = 0`.
    ///
    /// This is the default option.
    #[default]
    Zero,

    /// The wrapper is not treated as an equation, and the text is left as it is.
    Keep,
}

/// A builder for [`ConvertOptions`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertOptionsBuilder(ConvertOptions);

impl ConvertOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the equation wrapper.
    pub fn wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.0.wrapper = wrapper.into();
        self
    }

    /// Sets the glyph used for explicit multiplication. See [`MulGlyph`] for more information.
    pub fn mul(mut self, mul: MulGlyph) -> Self {
        self.0.mul = mul;
        self
    }

    /// Sets the policy for wrappers with a single expression. See [`MissingRhs`] for more
    /// information.
    pub fn missing_rhs(mut self, missing_rhs: MissingRhs) -> Self {
        self.0.missing_rhs = missing_rhs;
        self
    }

    /// Sets whether to strip a leading function definition such as `f(x) =`.
    pub fn strip_function_prefix(mut self, strip_function_prefix: bool) -> Self {
        self.0.strip_function_prefix = strip_function_prefix;
        self
    }

    /// Builds the [`ConvertOptions`].
    pub fn build(self) -> ConvertOptions {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.wrapper, "Eq");
        assert_eq!(options.mul, MulGlyph::Cdot);
        assert_eq!(options.missing_rhs, MissingRhs::Zero);
        assert!(options.strip_function_prefix);
        assert_eq!(ConvertOptionsBuilder::new().build(), options);
    }

    #[test]
    fn builder() {
        let options = ConvertOptions::default()
            .into_builder()
            .wrapper("Equality")
            .mul(MulGlyph::Times)
            .missing_rhs(MissingRhs::Keep)
            .strip_function_prefix(false)
            .build();

        assert_eq!(options, ConvertOptions {
            wrapper: "Equality".to_string(),
            mul: MulGlyph::Times,
            missing_rhs: MissingRhs::Keep,
            strip_function_prefix: false,
        });
        assert_eq!(options.latex(), LatexOptions { mul: MulGlyph::Times });
    }
}
