//! AggregationController: one refresh cycle across every source.
//!
//! The pulse feed and the best-effort batch run concurrently. The batch is
//! settled in full before anything is merged, and each outcome touches
//! only its own slot. A refresh never fails as a whole.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use radar_core::data::{build_client, FetchError, HttpSource, SourceFetcher};
use radar_core::domain::Payload;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, RadarConfig};
use crate::fanout::{settle_all, tally};
use crate::snapshot::DashboardSnapshot;

pub struct AggregationController {
    mandatory: Box<dyn SourceFetcher>,
    batch: Vec<Box<dyn SourceFetcher>>,
    timeout: Duration,
    state: watch::Sender<Arc<DashboardSnapshot>>,
}

impl AggregationController {
    pub fn new(
        mandatory: Box<dyn SourceFetcher>,
        batch: Vec<Box<dyn SourceFetcher>>,
        timeout: Duration,
    ) -> Self {
        let initial = Arc::new(DashboardSnapshot::new(mandatory.name()));
        let (state, _) = watch::channel(initial);
        Self {
            mandatory,
            batch,
            timeout,
            state,
        }
    }

    /// Build HTTP sources for every configured slot.
    pub fn from_config(config: &RadarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = build_client().map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let mut mandatory = None;
        let mut batch: Vec<Box<dyn SourceFetcher>> = Vec::new();
        for source in &config.sources {
            let fetcher = Box::new(HttpSource::new(
                client.clone(),
                source.name.clone(),
                &config.base_url,
                &source.path,
                source.kind,
                config.timeout(),
            ));
            if source.mandatory {
                mandatory = Some(fetcher);
            } else {
                batch.push(fetcher);
            }
        }

        let mandatory =
            mandatory.ok_or_else(|| ConfigError::Invalid("no mandatory source".into()))?;
        Ok(Self::new(mandatory, batch, config.timeout()))
    }

    /// Current snapshot view.
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.state.borrow().clone()
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Run one refresh cycle and return the resulting snapshot.
    ///
    /// Does not guard against overlap; callers check [`is_loading`](Self::is_loading).
    pub async fn refresh(&self) -> Arc<DashboardSnapshot> {
        self.state
            .send_modify(|snap| Arc::make_mut(snap).loading = true);
        info!(sources = self.batch.len() + 1, "refresh started");

        let pulse = self.fetch_one(self.mandatory.as_ref());
        let batch = settle_all(
            self.batch
                .iter()
                .map(|f| (f.name(), self.fetch_one(f.as_ref()))),
        );
        let (pulse, settled) = tokio::join!(pulse, batch);

        let (ok, failed) = tally(&settled);
        let now = Utc::now();
        self.state.send_modify(|snap| {
            let snap = Arc::make_mut(snap);
            let pulse_name = self.mandatory.name();
            match pulse {
                Ok(payload) => {
                    snap.record_success(pulse_name, payload, now);
                    snap.pulse_error = None;
                }
                Err(e) => {
                    warn!(source = pulse_name, error = %e, "pulse fetch failed, keeping previous data");
                    snap.record_failure(pulse_name, e.to_string());
                    snap.pulse_error = Some(e.to_string());
                }
            }
            for outcome in settled {
                match outcome.outcome {
                    Ok(payload) => snap.record_success(outcome.key, payload, now),
                    Err(e) => {
                        warn!(source = outcome.key, error = %e, "fetch failed, slot left stale");
                        snap.record_failure(outcome.key, e.to_string());
                    }
                }
            }
            snap.loading = false;
            snap.last_updated = Some(now);
        });

        info!(succeeded = ok, failed, "refresh finished");
        self.snapshot()
    }

    async fn fetch_one(&self, fetcher: &dyn SourceFetcher) -> Result<Payload, FetchError> {
        let payload = match tokio::time::timeout(self.timeout, fetcher.fetch()).await {
            Ok(result) => result?,
            Err(_) => return Err(FetchError::timeout(self.timeout)),
        };
        if payload.kind() != fetcher.kind() {
            return Err(FetchError::KindMismatch {
                expected: fetcher.kind(),
                actual: payload.kind(),
            });
        }
        debug!(source = fetcher.name(), "fetch ok");
        Ok(payload)
    }
}
