//! Periodic refresh driver.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::controller::AggregationController;

/// Refresh immediately, then every `every`. A tick that finds a refresh
/// already in flight is skipped.
pub fn spawn_refresh_loop(controller: Arc<AggregationController>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;

            if controller.is_loading() {
                tracing::debug!("refresh in flight, skipping tick");
                continue;
            }
            controller.refresh().await;
        }
    })
}
