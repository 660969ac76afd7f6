use async_trait::async_trait;
use serde::Serialize;

use super::{Notifier, NotifyError};
use crate::registration::MessageMode;

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

/// Sends registration notices to the organizers through the WhatsApp Cloud API.
pub struct WhatsAppNotifier {
    http: reqwest::Client,
    messages_url: String,
    token: String,
    recipient: String,
}

impl WhatsAppNotifier {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        phone_number_id: &str,
        token: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        WhatsAppNotifier {
            http,
            messages_url: format!(
                "{}/{}/messages",
                base_url.trim_end_matches('/'),
                phone_number_id
            ),
            token: token.into(),
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    fn channel(&self) -> &str {
        "whatsapp"
    }

    fn mode(&self) -> MessageMode {
        MessageMode::WhatsApp
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let payload = MessagePayload {
            messaging_product: "whatsapp",
            to: &self.recipient,
            kind: "text",
            text: TextBody { body: text },
        };

        let response = self
            .http
            .post(&self.messages_url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                channel: "whatsapp",
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
