//! SQL `LIKE` patterns.
//!
//! A [`LikePattern`] is compiled once into an anchored regular expression:
//!
//! | Pattern | Meaning                 |
//! |---------|-------------------------|
//! | `%`     | any run of characters   |
//! | `_`     | exactly one character   |
//! | `\x`    | the literal character x |
//!
//! So `%ada%` is "contains", `ada%` is "starts with", `%ada` is "ends with"
//! and `ada` is an exact match.

use regex::{Regex, RegexBuilder};

/// A compiled SQL `LIKE` pattern.
#[derive(Debug, Clone)]
pub struct LikePattern {
    regex: Regex,
}

impl LikePattern {
    /// Compiles a case-sensitive pattern (`like`).
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, false)
    }

    /// Compiles a case-insensitive pattern (`ilike`).
    pub fn case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, true)
    }

    fn build(pattern: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&translate(pattern))
            .case_insensitive(case_insensitive)
            .dot_matches_new_line(true)
            .build()?;
        Ok(LikePattern { regex })
    }

    /// Returns `true` if the whole of `text` matches the pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Translates `LIKE` syntax into an anchored regex source.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    out.push('^');

    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '\\' => {
                // A trailing backslash is a literal backslash
                let literal = chars.next().unwrap_or('\\');
                out.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            }
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push('$');
    out
}
