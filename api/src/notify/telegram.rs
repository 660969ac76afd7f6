use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{Notifier, NotifyError};
use crate::registration::MessageMode;

/// Identifies a chat either by numeric id or by `@username` for public channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    #[serde(default)]
    pub can_join_groups: bool,
    #[serde(default)]
    pub can_read_all_group_messages: bool,
    #[serde(default)]
    pub supports_inline_queries: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

/// A minimal Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(http: reqwest::Client, base_url: &str, token: impl Into<String>) -> Self {
        TelegramClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn call<P, R>(&self, method: &str, payload: &P) -> Result<R, NotifyError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await?
            .json::<ApiResponse<R>>()
            .await?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(NotifyError::Telegram(
                description.unwrap_or_else(|| format!("{method} returned no result")),
            )),
        }
    }

    pub async fn send_message(
        &self,
        chat_id: &ChatId,
        text: &str,
        parse_mode: Option<&'static str>,
    ) -> Result<Message, NotifyError> {
        self.call(
            "sendMessage",
            &SendMessage {
                chat_id,
                text,
                parse_mode,
            },
        )
        .await
    }

    /// Long-poll for updates after `offset`, waiting up to `timeout_secs` for one to arrive.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, NotifyError> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout_secs,
                allowed_updates: &["message"],
            },
        )
        .await
    }
}

/// The Bot API `parse_mode` for a message mode.
pub fn telegram_parse_mode(mode: MessageMode) -> Result<Option<&'static str>, NotifyError> {
    match mode {
        MessageMode::Plain => Ok(None),
        MessageMode::Html => Ok(Some("HTML")),
        MessageMode::Markdown => Ok(Some("Markdown")),
        MessageMode::MarkdownV2 => Ok(Some("MarkdownV2")),
        MessageMode::WhatsApp => Err(NotifyError::UnsupportedMode(mode, "telegram")),
    }
}

/// Posts registration notices to a Telegram channel.
#[derive(Debug)]
pub struct TelegramChannelNotifier {
    client: TelegramClient,
    chat: ChatId,
    mode: MessageMode,
}

impl TelegramChannelNotifier {
    pub fn new(client: TelegramClient, channel: impl Into<String>, mode: MessageMode) -> Self {
        TelegramChannelNotifier {
            client,
            chat: ChatId::Username(channel.into()),
            mode,
        }
    }
}

#[async_trait]
impl Notifier for TelegramChannelNotifier {
    fn channel(&self) -> &str {
        "telegram"
    }

    fn mode(&self) -> MessageMode {
        self.mode
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let parse_mode = telegram_parse_mode(self.mode)?;
        self.client
            .send_message(&self.chat, text, parse_mode)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!(telegram_parse_mode(MessageMode::Plain).unwrap(), None);
        assert_eq!(telegram_parse_mode(MessageMode::Html).unwrap(), Some("HTML"));
        assert_eq!(
            telegram_parse_mode(MessageMode::MarkdownV2).unwrap(),
            Some("MarkdownV2")
        );
        assert!(matches!(
            telegram_parse_mode(MessageMode::WhatsApp),
            Err(NotifyError::UnsupportedMode(MessageMode::WhatsApp, "telegram"))
        ));
    }

    #[test]
    fn chat_id_serializes_bare() {
        assert_eq!(
            serde_json::to_string(&ChatId::Username("@aktel_cs2".to_string())).unwrap(),
            r#""@aktel_cs2""#
        );
        assert_eq!(serde_json::to_string(&ChatId::Id(-100123)).unwrap(), "-100123");
    }

    #[tokio::test]
    async fn transport_errors_hide_the_token() {
        let client = TelegramClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            "SECRET-BOT-TOKEN",
        );

        let err = client
            .send_message(&ChatId::Id(1), "hello", None)
            .await
            .expect_err("nothing listens on port 1");

        assert!(matches!(err, NotifyError::Http(_)));
        assert!(!err.to_string().contains("SECRET-BOT-TOKEN"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-BOT-TOKEN"), "{err:?}");
        assert!(!format!("{client:?}").contains("SECRET-BOT-TOKEN"));
    }

    #[test]
    fn user_defaults_missing_flags() {
        let user: User =
            serde_json::from_str(r#"{"id": 7, "is_bot": false, "first_name": "Ali"}"#).unwrap();
        assert_eq!(user.id, 7);
        assert!(!user.can_join_groups);
        assert_eq!(user.username, None);
    }
}
