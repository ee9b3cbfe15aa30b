pub mod message;
pub mod pushplus;

use crate::model::NotifyError;

pub use pushplus::PushPlusNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No delivery credentials configured; nothing left the process.
    Skipped,
}

/// Push delivery sink. One best-effort attempt per call.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, title: &str, content: &str) -> Result<Delivery, NotifyError>;
}
