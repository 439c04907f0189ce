//! Configuration types for the bot detector.
//!
//! The detector reads its settings from one namespace inside an endpoint's
//! extra config document:
//!
//! ```json
//! {
//!   "github_com/devopsfaith/krakend-botdetector": {
//!     "denylist": ["a", "b"],
//!     "allowlist": ["c"],
//!     "patterns": ["(facebookexternalhit)/(\\d+)\\.(\\d+)"],
//!     "cacheSize": 1000
//!   }
//! }
//! ```

use crate::cache::MAX_CACHE_CAPACITY;
use crate::detectors::{PatternMatcher, RuleSet, UserAgentList};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Reserved key holding the detector settings.
pub const NAMESPACE: &str = "github_com/devopsfaith/krakend-botdetector";

/// Decision cache capacity used when none is configured.
pub const DEFAULT_CACHE_SIZE: usize = 4096;

/// Extensible per-service or per-endpoint configuration.
pub type ExtraConfig = serde_json::Map<String, serde_json::Value>;

/// Settings as they appear in the configuration document.
///
/// Missing or `null` lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDetectorConfig {
    /// Literal User-Agents always classified as bots
    pub denylist: Option<Vec<String>>,

    /// Literal User-Agents never classified as bots
    pub allowlist: Option<Vec<String>>,

    /// Regular expressions identifying bots
    pub patterns: Option<Vec<String>>,

    /// Decision cache capacity; absent or non-positive means the default.
    /// Values above `MAX_CACHE_CAPACITY` are clamped to it.
    #[serde(rename = "cacheSize", alias = "cache_size")]
    pub cache_size: Option<i64>,
}

impl RawDetectorConfig {
    /// Validate the settings and compile the patterns.
    pub fn compile(self) -> Result<DetectorConfig> {
        let cache_size = match self.cache_size {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => DEFAULT_CACHE_SIZE,
        };
        let cache_size = cache_size.min(MAX_CACHE_CAPACITY);

        let config = DetectorConfig::new(
            self.denylist.unwrap_or_default(),
            self.allowlist.unwrap_or_default(),
            self.patterns.unwrap_or_default(),
        )?;

        Ok(config.with_cache_size(cache_size))
    }
}

/// Validated, immutable detector configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    rules: RuleSet,
    cache_size: usize,
}

impl DetectorConfig {
    /// Build a configuration, compiling every pattern.
    pub fn new<D, A, P>(denylist: D, allowlist: A, patterns: P) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let rules = RuleSet::new(
            UserAgentList::allowlist(allowlist),
            UserAgentList::denylist(denylist),
            PatternMatcher::new(patterns)?,
        );

        Ok(Self {
            rules,
            cache_size: DEFAULT_CACHE_SIZE,
        })
    }

    /// Override the decision cache capacity.
    ///
    /// Zero is accepted here and rejected when the detector is built.
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub(crate) fn into_parts(self) -> (RuleSet, usize) {
        (self.rules, self.cache_size)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

/// Extract the detector configuration from an extra config document.
///
/// Returns [`Error::NoConfig`] when the namespace is absent, which callers
/// treat as "detection not requested".
pub fn parse_config(extra: &ExtraConfig) -> Result<DetectorConfig> {
    let value = extra.get(NAMESPACE).ok_or(Error::NoConfig)?;
    let raw = RawDetectorConfig::deserialize(value).map_err(Error::MalformedConfig)?;
    raw.compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extra(value: serde_json::Value) -> ExtraConfig {
        let mut extra = ExtraConfig::new();
        extra.insert(NAMESPACE.to_string(), value);
        extra
    }

    #[test]
    fn test_no_namespace() {
        let mut other = ExtraConfig::new();
        let other_namespace = "github_com/devopsfaith/krakend-ratelimit";
        other.insert(other_namespace.to_string(), json!({}));

        assert!(matches!(parse_config(&other), Err(Error::NoConfig)));

        let empty = ExtraConfig::new();
        assert!(matches!(parse_config(&empty), Err(Error::NoConfig)));
    }

    #[test]
    fn test_full_config() {
        let config = parse_config(&extra(json!({
            "denylist": ["a", "b"],
            "allowlist": ["c", "Pingdom.com_bot_version_1.1"],
            "patterns": [
                r"(Pingdom.com_bot_version_)(\d+)\.(\d+)",
                r"(facebookexternalhit)/(\d+)\.(\d+)"
            ],
            "cacheSize": 10
        })))
        .unwrap();

        assert_eq!(config.cache_size(), 10);
        assert!(config.rules().in_denylist("a"));
        assert!(config.rules().in_allowlist("c"));
        assert_eq!(config.rules().patterns().len(), 2);
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let config = parse_config(&extra(json!({}))).unwrap();
        assert!(config.rules().allowlist().is_empty());
        assert!(config.rules().denylist().is_empty());
        assert!(config.rules().patterns().is_empty());
        assert_eq!(config.cache_size(), DEFAULT_CACHE_SIZE);
    }

    #[test]
    fn test_null_lists_are_empty() {
        let config = parse_config(&extra(json!({
            "denylist": null,
            "patterns": null
        })))
        .unwrap();
        assert!(config.rules().denylist().is_empty());
    }

    #[test]
    fn test_non_positive_cache_size_uses_default() {
        for size in [0, -5] {
            let config = parse_config(&extra(json!({ "cacheSize": size }))).unwrap();
            assert_eq!(config.cache_size(), DEFAULT_CACHE_SIZE);
        }
    }

    #[test]
    fn test_oversized_cache_size_is_clamped() {
        for size in [2_000_000, i64::MAX] {
            let config = parse_config(&extra(json!({ "cacheSize": size }))).unwrap();
            assert_eq!(config.cache_size(), MAX_CACHE_CAPACITY);
        }
    }

    #[test]
    fn test_snake_case_cache_size_alias() {
        let config = parse_config(&extra(json!({ "cache_size": 7 }))).unwrap();
        assert_eq!(config.cache_size(), 7);
    }

    #[test]
    fn test_malformed_config() {
        for value in [
            json!("not an object"),
            json!({ "denylist": "a" }),
            json!({ "allowlist": [1, 2] }),
            json!({ "patterns": {"a": "b"} }),
            json!({ "cacheSize": "big" }),
        ] {
            let result = parse_config(&extra(value.clone()));
            assert!(
                matches!(result, Err(Error::MalformedConfig(_))),
                "expected malformed config for {value}"
            );
        }
    }

    #[test]
    fn test_invalid_pattern() {
        let result = parse_config(&extra(json!({
            "patterns": ["valid", "a(b"]
        })));

        match result {
            Err(Error::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "a(b"),
            other => panic!("expected invalid pattern, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config(&extra(json!({
            "denylist": ["a"],
            "comment": "kept for operators"
        })))
        .unwrap();
        assert!(config.rules().in_denylist("a"));
    }

    #[test]
    fn test_raw_config_serialization() {
        let raw = RawDetectorConfig {
            denylist: Some(vec!["a".to_string()]),
            cache_size: Some(12),
            ..Default::default()
        };
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["cacheSize"], 12);

        let parsed: RawDetectorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, raw);
    }
}
