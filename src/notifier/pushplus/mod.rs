pub mod sender;

use crate::model::NotifyError;
use crate::notifier::{Delivery, Notifier};
use reqwest::Client;
use tracing::info;

pub const PUSHPLUS_URL: &str = "http://www.pushplus.plus/send";

pub struct PushPlusNotifier {
    pub token: Option<String>,
    pub endpoint: String,
    pub client: Client,
}

impl PushPlusNotifier {
    pub fn new(token: Option<String>) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            token: token.filter(|t| !t.trim().is_empty()),
            endpoint: PUSHPLUS_URL.to_string(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for PushPlusNotifier {
    async fn send(&self, title: &str, content: &str) -> Result<Delivery, NotifyError> {
        let Some(token) = self.token.as_deref() else {
            info!("ℹ️ No PushPlus token configured, skipping push");
            return Ok(Delivery::Skipped);
        };
        sender::send_html(self, token, title, content).await?;
        Ok(Delivery::Sent)
    }
}
