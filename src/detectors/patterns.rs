//! Regular-expression User-Agent signatures.
//!
//! Patterns are unanchored searches: `(facebookexternalhit)/(\d+)\.(\d+)`
//! matches anywhere in the header value. The `regex` crate runs in linear
//! time, so hostile User-Agents cannot trigger catastrophic backtracking.

use super::Rule;
use crate::error::{Error, Result};
use crate::verdict::Verdict;
use regex::Regex;

/// Ordered set of compiled bot signatures.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<Regex>,
}

impl PatternMatcher {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| Error::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Position of the first pattern matching the User-Agent.
    pub fn first_match(&self, ua: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.is_match(ua))
    }

    /// True if any pattern matches.
    pub fn matches_any(&self, ua: &str) -> bool {
        self.first_match(ua).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Source text of the compiled patterns, in order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}

impl Rule for PatternMatcher {
    fn evaluate(&self, ua: &str) -> Option<Verdict> {
        let index = self.first_match(ua)?;
        Some(Verdict::PatternMatch { index })
    }
}
