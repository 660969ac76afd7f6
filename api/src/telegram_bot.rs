use std::{sync::Arc, time::Duration};

use aktel_db::users::NewTelegramUser;
use tokio::sync::watch;
use tracing::{event, Level};

use crate::{
    notify::{ChatId, Message, TelegramClient, User},
    store::RegistrationStore,
};

const POLL_TIMEOUT_SECS: u64 = 60;
const RETRY_DELAY: Duration = Duration::from_secs(5);

const WELCOME: &str = "👋 Welcome to AKTEL Tournament bot!\nPress /help to use.";
const HELP: &str = "Here is what I can do:\n\
    /start - Start the bot\n\
    /teams - List registered teams\n\
    /help - Show this message";
const UNKNOWN_COMMAND: &str = "❓ Unknown command.";
const NOT_A_COMMAND: &str = "I only respond to commands like /start or /help.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Teams,
    Unknown,
}

/// Parse a bot command such as `/teams` or `/teams@aktel_bot`. Returns `None` for
/// text that isn't a command.
pub fn parse_command(text: &str) -> Option<Command> {
    let word = text.split_whitespace().next()?.strip_prefix('/')?;
    let name = word.split('@').next().unwrap_or(word);

    let command = match name {
        "start" => Command::Start,
        "help" => Command::Help,
        "teams" => Command::Teams,
        _ => Command::Unknown,
    };

    Some(command)
}

impl From<&User> for NewTelegramUser {
    fn from(user: &User) -> Self {
        NewTelegramUser {
            tg_id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            language_code: user.language_code.clone(),
            is_bot: user.is_bot,
            can_join_groups: user.can_join_groups,
            can_read_all_group_messages: user.can_read_all_group_messages,
            supports_inline_queries: user.supports_inline_queries,
        }
    }
}

/// Answers commands sent to the bot and records everyone who writes to it.
pub struct TelegramBot {
    client: TelegramClient,
    store: Arc<dyn RegistrationStore>,
}

impl TelegramBot {
    pub fn new(client: TelegramClient, store: Arc<dyn RegistrationStore>) -> Self {
        TelegramBot { client, store }
    }

    /// Poll for updates until `shutdown` flips to true.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        event!(Level::INFO, "Telegram bot polling started");
        let mut offset = 0;

        loop {
            let updates = tokio::select! {
                _ = shutdown.changed() => break,
                updates = self.client.get_updates(offset, POLL_TIMEOUT_SECS) => updates,
            };

            match updates {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        if let Some(message) = update.message {
                            self.handle_message(&message).await;
                        }
                    }
                }
                Err(e) => {
                    event!(Level::ERROR, error = %e, "fetching Telegram updates failed");
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }
        }

        event!(Level::INFO, "Telegram bot polling stopped");
    }

    pub async fn handle_message(&self, message: &Message) {
        if let Some(user) = &message.from {
            if let Err(e) = self.store.save_telegram_user(user.into()).await {
                event!(Level::ERROR, error = %e, tg_id = user.id, "saving Telegram user failed");
            }
        }

        let reply = match message.text.as_deref().and_then(parse_command) {
            Some(command) => self.reply_for(command).await,
            None => NOT_A_COMMAND.to_string(),
        };

        let chat = ChatId::Id(message.chat.id);
        if let Err(e) = self.client.send_message(&chat, &reply, None).await {
            event!(
                Level::ERROR,
                error = %e,
                chat_id = message.chat.id,
                "replying on Telegram failed"
            );
        }
    }

    async fn reply_for(&self, command: Command) -> String {
        match command {
            Command::Start => WELCOME.to_string(),
            Command::Help => HELP.to_string(),
            Command::Teams => match self.store.registered_team_names().await {
                Ok(Some(names)) if !names.is_empty() => list_teams(&names),
                Ok(Some(_)) => "No teams have registered yet.".to_string(),
                Ok(None) => "There is no active tournament right now.".to_string(),
                Err(e) => {
                    event!(Level::ERROR, error = %e, "listing registered teams failed");
                    "❌ Could not load the team list, please try again later.".to_string()
                }
            },
            Command::Unknown => UNKNOWN_COMMAND.to_string(),
        }
    }
}

fn list_teams(names: &[String]) -> String {
    let mut msg = format!("Registered teams ({}):", names.len());
    for (i, name) in names.iter().enumerate() {
        msg.push_str(&format!("\n{}. {}", i + 1, name));
    }
    msg
}
