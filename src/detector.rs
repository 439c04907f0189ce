//! Cached User-Agent bot detector.

use crate::cache::DetectionCache;
use crate::config::DetectorConfig;
use crate::detectors::{RuleSet, UserAgentSource};
use crate::error::Result;
use crate::verdict::Verdict;
use http::HeaderMap;
use std::sync::Arc;
use tracing::debug;

/// Opaque request classifier handed to router adapters.
pub type DetectorFn = Arc<dyn Fn(&HeaderMap) -> bool + Send + Sync>;

/// Decides whether a request comes from a bot.
///
/// Rules are immutable after construction. Decisions are memoized per raw
/// User-Agent in a bounded LRU cache owned by this instance.
#[derive(Debug)]
pub struct Detector {
    rules: RuleSet,
    cache: DetectionCache<String, bool>,
}

impl Detector {
    /// Create a detector, allocating its decision cache.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let (rules, cache_size) = config.into_parts();
        let cache = DetectionCache::new("user_agent_decisions", cache_size)?;

        debug!(
            allowlist = rules.allowlist().len(),
            denylist = rules.denylist().len(),
            patterns = rules.patterns().len(),
            cache = cache.name(),
            cache_size,
            "Bot detector created"
        );

        Ok(Self { rules, cache })
    }

    /// Classify a request by its User-Agent header.
    pub fn is_bot<R>(&self, request: &R) -> bool
    where
        R: UserAgentSource + ?Sized,
    {
        self.is_bot_user_agent(&request.user_agent())
    }

    /// Classify a raw User-Agent value.
    pub fn is_bot_user_agent(&self, ua: &str) -> bool {
        if let Some(decision) = self.cache.get(ua) {
            return decision;
        }

        let decision = self.rules.classify(ua).is_bot();
        self.cache.insert(ua.to_string(), decision);
        decision
    }

    /// Run the rules without consulting or filling the cache.
    pub fn classify(&self, ua: &str) -> Verdict {
        self.rules.classify(ua)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn cache(&self) -> &DetectionCache<String, bool> {
        &self.cache
    }

    /// Wrap the detector as a plain classifier function.
    pub fn into_fn(self) -> DetectorFn {
        let detector = Arc::new(self);
        Arc::new(move |headers: &HeaderMap| detector.is_bot(headers))
    }
}
