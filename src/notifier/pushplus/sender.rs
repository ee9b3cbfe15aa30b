// notifier/pushplus/sender.rs

use crate::model::NotifyError;
use crate::notifier::pushplus::PushPlusNotifier;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct PushRequest<'a> {
    pub token: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub template: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PushResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// Checks the PushPlus envelope; anything but code 200 is an API error.
pub fn check_response(body: &str) -> Result<(), NotifyError> {
    let parsed: PushResponse = serde_json::from_str(body)
        .map_err(|e| NotifyError::Api(format!("unreadable response ({}): {}", e, body)))?;
    if parsed.code != 200 {
        return Err(NotifyError::Api(format!("code {}: {}", parsed.code, parsed.msg)));
    }
    Ok(())
}

/// Posts one HTML message. Single attempt, no retry.
pub async fn send_html(
    notifier: &PushPlusNotifier,
    token: &str,
    title: &str,
    content: &str,
) -> Result<(), NotifyError> {
    let payload = PushRequest {
        token,
        title,
        content,
        template: "html",
    };
    info!("📤 Sending PushPlus message: {}", title);

    let response = match timeout(
        Duration::from_secs(10),
        notifier.client.post(&notifier.endpoint).json(&payload).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ PushPlus send() failed: {:?}", e);
            return Err(NotifyError::Http(e));
        }
        Err(_) => {
            warn!("⏳ PushPlus send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ PushPlus responded [{}]: {}", status, body);
        return Err(NotifyError::Api(format!("http status {}", status)));
    }
    check_response(&body)?;
    info!("✅ PushPlus response [{}]: {}", status, body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_html_template() {
        let payload = PushRequest {
            token: "t",
            title: "x",
            content: "<b>y</b>",
            template: "html",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["template"], "html");
        assert_eq!(json["content"], "<b>y</b>");
    }

    #[test]
    fn response_codes() {
        assert!(check_response(r#"{"code":200,"msg":"ok","data":"abc"}"#).is_ok());
        assert!(matches!(
            check_response(r#"{"code":903,"msg":"invalid token"}"#),
            Err(NotifyError::Api(_))
        ));
        assert!(matches!(check_response("<html>"), Err(NotifyError::Api(_))));
    }
}
