//! Outbound notifications sent as background side effects.

use async_trait::async_trait;

use postboard_core::result::AppResult;

/// Delivers a templated message to a recipient.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Send `template` rendered with `data` to `recipient`.
    async fn send(&self, recipient: &str, template: &str, data: serde_json::Value) -> AppResult<()>;
}

/// Notifier that records each message in the log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &str, template: &str, data: serde_json::Value) -> AppResult<()> {
        tracing::info!(recipient, template, data = %data, "Notification dispatched");
        Ok(())
    }
}
