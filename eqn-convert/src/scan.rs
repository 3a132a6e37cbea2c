//! Balanced-depth scanning over a single pair of delimiters.
//!
//! Every query tracks the nesting depth of one delimiter pair while walking the string, and
//! reports "not found" ([`None`]) instead of panicking when the delimiters are unbalanced. All
//! indices are byte indices; the delimiters and separators are ASCII, so an index returned here
//! is always a valid char boundary.

/// A pair of opening and closing delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// The opening delimiter.
    pub open: char,

    /// The closing delimiter.
    pub close: char,
}

/// Parentheses, `(` and `)`.
pub const PARENS: Delimiters = Delimiters { open: '(', close: ')' };

/// Curly braces, `{` and `}`.
pub const BRACES: Delimiters = Delimiters { open: '{', close: '}' };

/// Square brackets, `[` and `]`.
pub const BRACKETS: Delimiters = Delimiters { open: '[', close: ']' };

impl Delimiters {
    /// Returns the index of the first `sep` at depth 0.
    ///
    /// Returns [`None`] if there is no such separator, or if a closing delimiter without a
    /// matching opening delimiter appears before one is found.
    ///
    /// ```
    /// use eqn_convert::scan::PARENS;
    ///
    /// assert_eq!(PARENS.find_top_level("x, f(x,y)", ','), Some(1));
    /// assert_eq!(PARENS.find_top_level("f(x,y)", ','), None);
    /// ```
    pub fn find_top_level(&self, s: &str, sep: char) -> Option<usize> {
        let mut depth = 0usize;
        for (i, c) in s.char_indices() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                depth = depth.checked_sub(1)?;
            } else if c == sep && depth == 0 {
                return Some(i);
            }
        }
        None
    }

    /// Returns the indices of every `sep` at depth 0. Scanning stops at the first unmatched
    /// closing delimiter.
    pub fn find_all_top_level(&self, s: &str, sep: char) -> Vec<usize> {
        let mut depth = 0usize;
        let mut found = Vec::new();
        for (i, c) in s.char_indices() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => break,
                }
            } else if c == sep && depth == 0 {
                found.push(i);
            }
        }
        found
    }

    /// Returns the index of the delimiter that closes the group opened at `open_index`.
    ///
    /// Returns [`None`] if there is no opening delimiter at `open_index`, or if the group is never
    /// closed.
    pub fn matching_close(&self, s: &str, open_index: usize) -> Option<usize> {
        let rest = s.get(open_index..)?;
        if !rest.starts_with(self.open) {
            return None;
        }

        let mut depth = 0usize;
        for (i, c) in rest.char_indices() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                depth -= 1;
                if depth == 0 {
                    return Some(open_index + i);
                }
            }
        }
        None
    }

    /// Returns the index of the delimiter that opens the group closed at `close_index`, scanning
    /// backwards.
    pub fn matching_open(&self, s: &str, close_index: usize) -> Option<usize> {
        let head = s.get(..=close_index)?;
        if !head.ends_with(self.close) {
            return None;
        }

        let mut depth = 0usize;
        for (i, c) in head.char_indices().rev() {
            if c == self.close {
                depth += 1;
            } else if c == self.open {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Returns the content of the group opened at `open_index`, along with the index just past
    /// its closing delimiter.
    ///
    /// Sibling groups such as the two arguments of `\frac{a}{b}` are extracted by calling this
    /// once per group, each time from the index returned by the previous call.
    ///
    /// ```
    /// use eqn_convert::scan::BRACES;
    ///
    /// let s = "{\\frac{1}{x}}{2}";
    /// let (num, next) = BRACES.group(s, 0).unwrap();
    /// let (den, _) = BRACES.group(s, next).unwrap();
    /// assert_eq!((num, den), ("\\frac{1}{x}", "2"));
    /// ```
    pub fn group<'s>(&self, s: &'s str, open_index: usize) -> Option<(&'s str, usize)> {
        let close_index = self.matching_close(s, open_index)?;
        Some((&s[open_index + 1..close_index], close_index + 1))
    }

    /// Splits the string at every `sep` at depth 0. The segments are not trimmed.
    pub fn top_level_segments<'s>(&self, s: &'s str, sep: char) -> Vec<&'s str> {
        let mut segments = Vec::new();
        let mut start = 0;
        for i in self.find_all_top_level(s, sep) {
            segments.push(&s[start..i]);
            start = i + sep.len_utf8();
        }
        segments.push(&s[start..]);
        segments
    }

    /// Returns true if the whole string is a single delimited group, such as `(x+1)`, but not
    /// `(x)/(y)`.
    pub fn encloses(&self, s: &str) -> bool {
        s.len() >= 2 && self.matching_close(s, 0) == Some(s.len() - self.close.len_utf8())
    }

    /// Returns the content of the string with any number of enclosing groups removed, as in
    /// `((x))` → `x`.
    pub fn strip<'s>(&self, mut s: &'s str) -> &'s str {
        while self.encloses(s) {
            s = s[1..s.len() - 1].trim();
        }
        s
    }

    /// Returns true if every delimiter in the string is matched.
    pub fn is_balanced(&self, s: &str) -> bool {
        let mut depth = 0usize;
        for c in s.chars() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                }
            }
        }
        depth == 0
    }
}
