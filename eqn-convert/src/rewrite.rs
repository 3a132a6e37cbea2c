//! The fixed-point rewriter.
//!
//! A [`Rule`] rewrites its input in passes. [`fixed_point`] repeats passes until one makes no
//! change, which handles rewrites that expose new matches (such as a division whose operand was
//! itself just wrapped in parentheses).

use log::{trace, warn};
use regex::{Captures, Regex};

/// The number of passes allowed beyond one per byte of input.
const EXTRA_PASSES: usize = 8;

/// A rewrite rule.
///
/// A rule must never reintroduce its own pattern, otherwise it has no fixed point. Rules that do
/// anyway are cut off by [`fixed_point`] after a bounded number of passes.
pub trait Rule {
    /// A short name for the rule, used in log messages.
    fn name(&self) -> &str;

    /// Applies a single pass of the rule.
    fn apply(&self, input: &str) -> String;
}

/// A rule that replaces every match of a regular expression with the output of a function of its
/// captures.
pub struct RegexRule<F> {
    name: &'static str,
    pattern: &'static Regex,
    replace: F,
}

impl<F> RegexRule<F>
where
    F: Fn(&Captures) -> String,
{
    /// Creates a new rule.
    pub fn new(name: &'static str, pattern: &'static Regex, replace: F) -> Self {
        Self { name, pattern, replace }
    }
}

impl<F> Rule for RegexRule<F>
where
    F: Fn(&Captures) -> String,
{
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, |caps: &Captures| (self.replace)(caps))
            .into_owned()
    }
}

/// A rule that rewrites one site per pass, found by a function that scans the input itself.
///
/// Rewrites whose operands are delimited groups (such as both arguments of `\frac{..}{..}`) cannot
/// be matched by a regular expression, so the function locates them with the balanced-depth
/// scanner in [`crate::scan`]. It returns [`None`] when there is nothing left to rewrite.
pub struct SiteRule {
    name: &'static str,
    rewrite: fn(&str) -> Option<String>,
}

impl SiteRule {
    /// Creates a new rule.
    pub const fn new(name: &'static str, rewrite: fn(&str) -> Option<String>) -> Self {
        Self { name, rewrite }
    }
}

impl Rule for SiteRule {
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, input: &str) -> String {
        (self.rewrite)(input).unwrap_or_else(|| input.to_owned())
    }
}

/// Applies the rule until a pass produces no change, and returns the result.
///
/// Every rewrite in this crate strictly reduces the number of places its rule can match, so the
/// number of passes is bounded by the length of the input. If that bound is exceeded, rewriting
/// stops with a warning and the latest result is returned.
pub fn fixed_point(rule: &dyn Rule, input: &str) -> String {
    let budget = input.len() + EXTRA_PASSES;
    let mut current = input.to_owned();

    for pass in 1..=budget {
        let next = rule.apply(&current);
        if next == current {
            return current;
        }
        trace!("{} pass {}: {}", rule.name(), pass, next);
        current = next;
    }

    warn!("{}: no fixed point after {} passes; using the latest rewrite", rule.name(), budget);
    current
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use pretty_assertions::assert_eq;
    use super::*;

    static INNER_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").unwrap());
    static ANYTHING: Lazy<Regex> = Lazy::new(|| Regex::new(r"x").unwrap());

    #[test]
    fn nested_patterns_converge() {
        let rule = RegexRule::new("brackets", &INNER_PAIR, |caps: &Captures| format!("({})", &caps[1]));
        assert_eq!(fixed_point(&rule, "[[a][b]]"), "((a)(b))");
    }

    #[test]
    fn unchanged_input() {
        let rule = RegexRule::new("brackets", &INNER_PAIR, |caps: &Captures| format!("({})", &caps[1]));
        assert_eq!(fixed_point(&rule, "a+b"), "a+b");
        assert_eq!(fixed_point(&rule, ""), "");
    }

    #[test]
    fn site_rule_rewrites_one_site_per_pass() {
        fn first_star(input: &str) -> Option<String> {
            let i = input.find('*')?;
            Some(format!("{}x{}", &input[..i], &input[i + 1..]))
        }

        let rule = SiteRule::new("stars", first_star);
        assert_eq!(rule.apply("a*b*c"), "axb*c");
        assert_eq!(fixed_point(&rule, "a*b*c"), "axbxc");
    }

    #[test]
    fn runaway_rule_is_cut_off() {
        // reintroduces its own pattern on every pass
        let rule = RegexRule::new("runaway", &ANYTHING, |_: &Captures| "xx".to_string());
        let result = fixed_point(&rule, "x");
        assert_eq!(result.len(), 1 << (1 + EXTRA_PASSES));
    }
}
