//! SourceFetcher trait and structured fetch errors.
//!
//! The SourceFetcher trait abstracts over one remote metric endpoint so the
//! aggregation layer can fan out to HTTP sources in production and to
//! scripted fakes in tests.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Payload, PayloadKind};

/// Why one source produced no payload this cycle.
///
/// Every variant is a plain failure for the slot: there is no partial or
/// ambiguous outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("expected a {expected:?} payload, got {actual:?}")]
    KindMismatch {
        expected: PayloadKind,
        actual: PayloadKind,
    },

    #[error("source error: {0}")]
    Other(String),
}

impl FetchError {
    /// Timeout after `after`, saturating at `u64::MAX` milliseconds.
    pub fn timeout(after: Duration) -> Self {
        FetchError::Timeout {
            after_ms: u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// One logical metric source.
///
/// Implementations fetch and decode one endpoint. They do not retry and do
/// not know about the snapshot; the controller decides what a failure means.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Logical slot name (e.g. `credit_spread`).
    fn name(&self) -> &str;

    /// Payload shape this source produces.
    fn kind(&self) -> PayloadKind;

    /// Fetch, decode and sanitize one payload.
    async fn fetch(&self) -> Result<Payload, FetchError>;
}
