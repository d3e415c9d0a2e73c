//! HTTP source: one GET per fetch against the dashboard backend.

use std::time::Duration;

use async_trait::async_trait;

use super::fetcher::{FetchError, SourceFetcher};
use super::ingest;
use crate::domain::{Payload, PayloadKind};

/// Build the shared client used by every [`HttpSource`].
pub fn build_client() -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(concat!("radar/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FetchError::Other(format!("failed to build HTTP client: {e}")))
}

/// A JSON endpoint decoded into one payload shape.
#[derive(Debug, Clone)]
pub struct HttpSource {
    name: String,
    url: String,
    kind: PayloadKind,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSource {
    /// `base_url` and `path` are joined with exactly one slash.
    pub fn new(
        client: reqwest::Client,
        name: impl Into<String>,
        base_url: &str,
        path: &str,
        kind: PayloadKind,
        timeout: Duration,
    ) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Self {
            name: name.into(),
            url,
            kind,
            timeout,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::timeout(self.timeout)
        } else {
            FetchError::NetworkUnreachable(e.to_string())
        }
    }
}

#[async_trait]
impl SourceFetcher for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PayloadKind {
        self.kind
    }

    async fn fetch(&self) -> Result<Payload, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        let (payload, report) = ingest::decode(self.kind, &body)?;

        if !report.is_clean() {
            tracing::warn!(
                source = %self.name,
                received = report.received,
                accepted = report.accepted,
                invalid_dates = report.invalid_dates,
                non_finite = report.non_finite,
                duplicates = report.duplicates,
                reordered = report.reordered,
                nulled_fields = report.nulled_fields,
                spread_mismatches = report.spread_mismatches,
                "repaired upstream payload"
            );
        }
        tracing::debug!(source = %self.name, rows = report.accepted, "fetched");

        Ok(payload)
    }
}
