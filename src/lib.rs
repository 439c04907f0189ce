//! User-Agent bot detection for HTTP handler chains.
//!
//! Classifies requests as bots from their `User-Agent` header using an
//! allowlist, a denylist and a set of regular expressions, and memoizes
//! decisions in a bounded LRU cache.
//!
//! # Features
//!
//! - Literal allow/deny lists (allowlist always wins)
//! - Unanchored regex signatures evaluated in order
//! - Per-detector LRU decision cache, safe for concurrent requests
//! - Config parsing that separates "not configured" from "misconfigured"
//! - A framework-agnostic guard answering `403 Forbidden` for bots
//!
//! # Example
//!
//! ```
//! use botdetector::{Detector, DetectorConfig};
//!
//! let config = DetectorConfig::new(
//!     ["a", "b"],
//!     ["c"],
//!     [r"(facebookexternalhit)/(\d+)\.(\d+)"],
//! )?;
//! let detector = Detector::new(config)?;
//!
//! assert!(detector.is_bot_user_agent("facebookexternalhit/1.1"));
//! assert!(!detector.is_bot_user_agent("c"));
//! # Ok::<(), botdetector::Error>(())
//! ```

pub mod cache;
pub mod config;
pub mod detector;
pub mod detectors;
pub mod error;
pub mod middleware;
pub mod verdict;

pub use config::{parse_config, DetectorConfig, ExtraConfig, DEFAULT_CACHE_SIZE, NAMESPACE};
pub use detector::{Detector, DetectorFn};
pub use detectors::UserAgentSource;
pub use error::{Error, Result};
pub use middleware::{BotGuard, Rejection};
pub use verdict::Verdict;
