//! User-Agent rules.
//!
//! Each rule inspects the raw User-Agent value and either decides the
//! classification or passes. Rules run in a fixed order: allowlist,
//! denylist, then patterns.

pub mod lists;
pub mod patterns;

pub use lists::{ListKind, UserAgentList};
pub use patterns::PatternMatcher;

use crate::verdict::Verdict;
use http::header::USER_AGENT;
use http::HeaderMap;
use std::borrow::Cow;

/// Anything a User-Agent can be read from.
///
/// A missing header yields the empty string, which is classified like any
/// other literal value.
pub trait UserAgentSource {
    fn user_agent(&self) -> Cow<'_, str>;
}

impl UserAgentSource for HeaderMap {
    fn user_agent(&self) -> Cow<'_, str> {
        match self.get(USER_AGENT) {
            Some(value) => String::from_utf8_lossy(value.as_bytes()),
            None => Cow::Borrowed(""),
        }
    }
}

impl<B> UserAgentSource for http::Request<B> {
    fn user_agent(&self) -> Cow<'_, str> {
        self.headers().user_agent()
    }
}

impl UserAgentSource for http::request::Parts {
    fn user_agent(&self) -> Cow<'_, str> {
        self.headers.user_agent()
    }
}

/// A single classification rule.
pub trait Rule: Send + Sync {
    /// Decide the verdict for this User-Agent, or `None` to pass.
    fn evaluate(&self, ua: &str) -> Option<Verdict>;
}

/// The complete, immutable rule chain.
#[derive(Debug, Clone)]
pub struct RuleSet {
    allowlist: UserAgentList,
    denylist: UserAgentList,
    patterns: PatternMatcher,
}

impl RuleSet {
    pub fn new(
        allowlist: UserAgentList,
        denylist: UserAgentList,
        patterns: PatternMatcher,
    ) -> Self {
        Self {
            allowlist,
            denylist,
            patterns,
        }
    }

    fn chain(&self) -> [&dyn Rule; 3] {
        [&self.allowlist, &self.denylist, &self.patterns]
    }

    /// Run the rules in order; the first decision wins.
    pub fn classify(&self, ua: &str) -> Verdict {
        self.chain()
            .into_iter()
            .find_map(|rule| rule.evaluate(ua))
            .unwrap_or(Verdict::Unmatched)
    }

    pub fn in_allowlist(&self, ua: &str) -> bool {
        self.allowlist.contains(ua)
    }

    pub fn in_denylist(&self, ua: &str) -> bool {
        self.denylist.contains(ua)
    }

    pub fn matches_any(&self, ua: &str) -> bool {
        self.patterns.matches_any(ua)
    }

    pub fn allowlist(&self) -> &UserAgentList {
        &self.allowlist
    }

    pub fn denylist(&self) -> &UserAgentList {
        &self.denylist
    }

    pub fn patterns(&self) -> &PatternMatcher {
        &self.patterns
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(
            UserAgentList::allowlist(Vec::<String>::new()),
            UserAgentList::denylist(Vec::<String>::new()),
            PatternMatcher::default(),
        )
    }
}
