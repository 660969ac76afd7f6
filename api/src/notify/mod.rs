mod telegram;
mod whatsapp;

pub use telegram::*;
pub use whatsapp::*;

use std::sync::Arc;

use aktel_db::{members::NewMember, teams::NewTeam};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{event, Instrument, Level};

use crate::{
    config::Config,
    registration::{format_registration, MessageMode},
};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("{channel} rejected the message with status {status}: {body}")]
    Rejected {
        channel: &'static str,
        status: u16,
        body: String,
    },

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("{0:?} messages can't be sent to {1}")]
    UnsupportedMode(MessageMode, &'static str),
}

/// The Telegram token is part of the request URL, so errors drop the URL before
/// they can be displayed or logged.
impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Http(e.without_url())
    }
}

/// An outbound channel that announces registrations.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in logs.
    fn channel(&self) -> &str;
    /// The markup the channel understands.
    fn mode(&self) -> MessageMode;
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

pub type SharedNotifier = Arc<dyn Notifier>;

/// Build the notifiers that have credentials configured. A channel without a
/// token is logged and left out.
pub fn notifiers_from_config(config: &Config, http: &reqwest::Client) -> Vec<SharedNotifier> {
    let mut notifiers: Vec<SharedNotifier> = Vec::with_capacity(2);

    match &config.whatsapp_token {
        Some(token) => notifiers.push(Arc::new(WhatsAppNotifier::new(
            http.clone(),
            &config.whatsapp_api_url,
            &config.whatsapp_phone_number_id,
            token.clone(),
            config.whatsapp_recipient.clone(),
        ))),
        None => event!(
            Level::ERROR,
            "WHATSAPP_TOKEN is not set, WhatsApp notifications are disabled"
        ),
    }

    match &config.telegram_token {
        Some(token) => notifiers.push(Arc::new(TelegramChannelNotifier::new(
            TelegramClient::new(http.clone(), &config.telegram_api_url, token.clone()),
            config.telegram_channel.clone(),
            MessageMode::Html,
        ))),
        None => event!(
            Level::ERROR,
            "TELEGRAM_TOKEN is not set, Telegram notifications are disabled"
        ),
    }

    notifiers
}

/// Announce a registration on every channel. Each send runs as its own task;
/// failures are logged and nothing waits for the sends to finish.
pub fn dispatch_registration(
    notifiers: &[SharedNotifier],
    team: &NewTeam,
    members: &[NewMember],
) {
    for notifier in notifiers {
        let notifier = notifier.clone();
        let text = format_registration(team, members, notifier.mode());
        let span = tracing::info_span!(
            "notify",
            channel = notifier.channel(),
            team = %team.name
        );

        tokio::spawn(
            async move {
                match notifier.send(&text).await {
                    Ok(()) => event!(Level::INFO, "registration notice sent"),
                    Err(e) => {
                        event!(Level::ERROR, error = %e, "sending registration notice failed")
                    }
                }
            }
            .instrument(span),
        );
    }
}
