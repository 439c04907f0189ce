//! Classification results.

use serde::{Deserialize, Serialize};

/// The rule that decided a User-Agent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Literal match in the allowlist
    Allowlisted,
    /// Literal match in the denylist
    Denylisted,
    /// Matched the pattern at this position in the configured order
    PatternMatch { index: usize },
    /// No rule applied; unknown agents are allowed
    Unmatched,
}

impl Verdict {
    /// Returns true if the request should be treated as a bot.
    pub fn is_bot(&self) -> bool {
        matches!(self, Verdict::Denylisted | Verdict::PatternMatch { .. })
    }

    /// Returns the verdict as a string for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allowlisted => "allowlisted",
            Verdict::Denylisted => "denylisted",
            Verdict::PatternMatch { .. } => "pattern_match",
            Verdict::Unmatched => "unmatched",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::PatternMatch { index } => write!(f, "pattern_match[{index}]"),
            other => f.write_str(other.as_str()),
        }
    }
}
