//! Framework-agnostic request guard.
//!
//! Router adapters build a [`BotGuard`] from an endpoint's extra config and
//! call [`BotGuard::check`] before the next handler. Configuration problems
//! never abort route registration: the endpoint just runs without bot
//! detection.

use crate::config::{parse_config, ExtraConfig};
use crate::detector::{Detector, DetectorFn};
use crate::error::Error;
use http::{HeaderMap, Response, StatusCode};
use std::fmt;
use tracing::{debug, warn};

/// Body sent with every rejection.
pub const REJECTION_BODY: &str = "bot rejected";

/// Applies a classifier ahead of a handler chain.
#[derive(Clone)]
pub struct BotGuard {
    detector: DetectorFn,
}

impl BotGuard {
    pub fn new(detector: Detector) -> Self {
        Self {
            detector: detector.into_fn(),
        }
    }

    pub fn from_fn(detector: DetectorFn) -> Self {
        Self { detector }
    }

    /// Install a guard if the config asks for one.
    ///
    /// A missing namespace is logged at debug level; any other failure is
    /// logged as a warning. Both leave the endpoint unguarded.
    pub fn from_extra_config(extra: &ExtraConfig) -> Option<Self> {
        let config = match parse_config(extra) {
            Ok(config) => config,
            Err(Error::NoConfig) => {
                debug!("botdetector: {}", Error::NoConfig);
                return None;
            }
            Err(e) => {
                warn!(error = %e, "botdetector: disabled for this endpoint");
                return None;
            }
        };

        match Detector::new(config) {
            Ok(detector) => Some(Self::new(detector)),
            Err(e) => {
                warn!(error = %e, "botdetector: unable to create the LRU detector");
                None
            }
        }
    }

    pub fn is_bot(&self, headers: &HeaderMap) -> bool {
        (self.detector)(headers)
    }

    /// Reject the request if it comes from a bot.
    pub fn check<B>(&self, request: &http::Request<B>) -> Result<(), Rejection> {
        if self.is_bot(request.headers()) {
            debug!(
                method = %request.method(),
                uri = %request.uri(),
                "botdetector: request rejected"
            );
            return Err(Rejection);
        }
        Ok(())
    }

    pub fn into_fn(self) -> DetectorFn {
        self.detector
    }
}

impl fmt::Debug for BotGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotGuard").finish_non_exhaustive()
    }
}

/// A request classified as a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection;

impl Rejection {
    pub fn status(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }

    /// Build the 403 response that stops the handler chain.
    pub fn into_response(self) -> Response<String> {
        let mut response = Response::new(REJECTION_BODY.to_string());
        *response.status_mut() = self.status();
        response
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REJECTION_BODY)
    }
}

impl std::error::Error for Rejection {}
