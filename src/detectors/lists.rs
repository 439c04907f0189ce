//! Literal User-Agent allow and deny lists.

use super::Rule;
use crate::verdict::Verdict;
use std::collections::HashSet;

/// Which decision a list forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Allow,
    Deny,
}

/// Exact, case-sensitive set of User-Agent values.
#[derive(Debug, Clone)]
pub struct UserAgentList {
    kind: ListKind,
    entries: HashSet<String>,
}

impl UserAgentList {
    pub fn new<I, S>(kind: ListKind, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowlist<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ListKind::Allow, entries)
    }

    pub fn denylist<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ListKind::Deny, entries)
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn contains(&self, ua: &str) -> bool {
        self.entries.contains(ua)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Rule for UserAgentList {
    fn evaluate(&self, ua: &str) -> Option<Verdict> {
        if !self.contains(ua) {
            return None;
        }
        Some(match self.kind {
            ListKind::Allow => Verdict::Allowlisted,
            ListKind::Deny => Verdict::Denylisted,
        })
    }
}
