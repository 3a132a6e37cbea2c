//! Property-based tests for the converters.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        canonical_to_presentation,
        canonical_to_simple,
        presentation_to_canonical,
        rational_function,
        simple_to_canonical,
        simple_to_presentation,
        split_equality,
        to_checker_equation,
        unwrap_equality,
        wrap_simple,
    };

    // Strategy for generating well-formed shorthand
    fn shorthand() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            (0u32..100).prop_map(|n| n.to_string()),
            "[a-dx-z]".prop_map(|name| name.to_string()),
        ];
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "^"]), inner.clone())
                    .prop_map(|(lhs, op, rhs)| format!("{}{}{}", lhs, op, rhs)),
                inner.clone().prop_map(|expr| format!("({})", expr)),
                inner.prop_map(|expr| format!("sqrt({})", expr)),
            ]
        })
    }

    // Strategy for generating text made of the characters the notations use, well-formed or not
    fn notation_soup() -> impl Strategy<Value = String> {
        r"[-+*/^(){}\[\]=,. a-z0-9\\$²×÷−]{0,30}"
    }

    proptest! {
        #[test]
        fn simple_to_canonical_is_idempotent(input in shorthand()) {
            let once = simple_to_canonical(&input);
            prop_assert_eq!(simple_to_canonical(&once), once);
        }

        #[test]
        fn equations_wrap_and_split(lhs in shorthand(), rhs in shorthand()) {
            let wrapped = wrap_simple(&format!("{} = {}", lhs, rhs));
            prop_assert!(wrapped.is_some());

            let wrapped = wrapped.unwrap_or_default();
            let (split_lhs, split_rhs) = split_equality(&wrapped[3..wrapped.len() - 1]);
            prop_assert_eq!(split_lhs, simple_to_canonical(&lhs));
            prop_assert_eq!(split_rhs, simple_to_canonical(&rhs));
        }

        #[test]
        fn converters_never_panic(input in notation_soup()) {
            simple_to_canonical(&input);
            simple_to_presentation(&input);
            presentation_to_canonical(&input);
            canonical_to_presentation(&input);
            canonical_to_simple(&input);
            split_equality(&input);
            unwrap_equality(&input);
            rational_function(&input);
            wrap_simple(&input);
            let _ = to_checker_equation(&input);
        }

        #[test]
        fn converters_never_panic_on_any_text(input in ".{0,40}") {
            simple_to_canonical(&input);
            simple_to_presentation(&input);
            presentation_to_canonical(&input);
            canonical_to_presentation(&input);
            canonical_to_simple(&input);
            let _ = to_checker_equation(&input);
        }
    }
}
