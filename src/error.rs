//! Error types for detector configuration and construction.

use thiserror::Error;

/// Errors raised while configuring or building a detector.
///
/// None of these are raised while classifying a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint carries no detector configuration.
    #[error("no config for the bot detector")]
    NoConfig,

    /// The detector namespace exists but does not have the expected shape.
    #[error("malformed bot detector config: {0}")]
    MalformedConfig(#[source] serde_json::Error),

    /// A configured pattern is not a valid regular expression.
    #[error("invalid bot detector pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The decision cache cannot be allocated with this capacity.
    #[error("invalid bot detector cache size: {0}")]
    InvalidCacheSize(usize),
}

impl Error {
    /// True when the feature was simply not requested.
    pub fn is_no_config(&self) -> bool {
        matches!(self, Error::NoConfig)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
