//! Token-bucket rate limiter keyed by client address.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use postboard_core::config::RateLimitConfig;

/// Per-client token buckets behind one lock.
///
/// All admissions and sweeps for every client contend on the same mutex, so
/// decisions for a given key are linearizable.
#[derive(Debug)]
pub struct RateLimiter {
    clients: Mutex<HashMap<String, Client>>,
    refill_rate: f64,
    burst: u32,
    stale_after: Duration,
    sweep_interval: Duration,
}

#[derive(Debug, Clone)]
struct Client {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

impl RateLimiter {
    /// Creates a limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_params(
            config.requests_per_second,
            config.burst,
            config.stale_after(),
            config.sweep_interval(),
        )
    }

    /// Creates a limiter with explicit parameters.
    pub fn with_params(
        refill_rate: f64,
        burst: u32,
        stale_after: Duration,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            refill_rate,
            burst,
            stale_after,
            sweep_interval,
        }
    }

    /// Try to take one token for `key`. `false` means the client must be rejected.
    pub async fn admit(&self, key: &str) -> bool {
        let mut clients = self.clients.lock().await;
        let now = Instant::now();
        let capacity = f64::from(self.burst);

        let client = clients.entry(key.to_string()).or_insert(Client {
            tokens: capacity,
            last_refill: now,
            last_seen: now,
        });
        client.last_seen = now;

        let elapsed = now.duration_since(client.last_refill).as_secs_f64();
        client.tokens = (client.tokens + elapsed * self.refill_rate).min(capacity);
        client.last_refill = now;

        if client.tokens >= 1.0 {
            client.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drop every client unseen for longer than the staleness window.
    ///
    /// Returns the number of clients removed.
    pub async fn sweep(&self) -> usize {
        let mut clients = self.clients.lock().await;
        let now = Instant::now();
        let before = clients.len();
        clients.retain(|_, c| now.duration_since(c.last_seen) <= self.stale_after);
        before - clients.len()
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// How often [`sweep`](Self::sweep) should run.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}
