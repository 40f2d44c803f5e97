//! Anchored pattern matching.
//!
//! The header and separator loops need "matching state machine positioned at
//! a byte offset" semantics: a pattern attempt that succeeds anywhere later
//! in the buffer must be rejected, because silently skipping an unparseable
//! span would misattribute it to whatever state comes next. [`AnchoredPattern`]
//! accepts a match only when it begins exactly at the caller's offset.

use regex::{Captures, Regex};

/// A compiled pattern whose matches are only accepted at an exact offset.
///
/// `regex::Regex` holds no search cursor, so a single instance can serve
/// repeated and concurrent calls at different offsets without interference.
#[derive(Debug, Clone)]
pub struct AnchoredPattern {
    regex: Regex,
}

impl AnchoredPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Attempts a match starting the search at `at`, returning captures only
    /// if the match begins exactly there.
    ///
    /// # Examples
    ///
    /// ```
    /// # use irodori::matcher::AnchoredPattern;
    /// let digits = AnchoredPattern::new(r"\d+").unwrap();
    /// assert!(digits.match_at("abc123", 3).is_some());
    /// assert!(digits.match_at("abc123", 0).is_none());
    /// ```
    pub fn match_at<'t>(&self, haystack: &'t str, at: usize) -> Option<Captures<'t>> {
        if at > haystack.len() {
            return None;
        }
        let caps = self.regex.captures_at(haystack, at)?;
        if caps.get(0)?.start() == at {
            Some(caps)
        } else {
            None
        }
    }
}
