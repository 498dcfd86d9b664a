//! Background eviction of stale rate-limit clients.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::limiter::RateLimiter;

impl RateLimiter {
    /// Sweep stale clients every [`sweep_interval`](Self::sweep_interval)
    /// until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run_sweeper(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.sweep_interval());
        info!(
            interval_secs = self.sweep_interval().as_secs(),
            "Rate limiter sweeper started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.sweep().await;
                    if removed > 0 {
                        debug!(removed, "Evicted stale rate limit clients");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Rate limiter sweeper stopped");
    }
}
