use std::sync::Arc;

use aktel_api::{
    notify::{
        Message, Notifier, NotifyError, TelegramChannelNotifier, TelegramClient, WhatsAppNotifier,
    },
    registration::MessageMode,
    telegram_bot::TelegramBot,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::common::{FakeStore, StoreBehavior};

fn sent_message_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ok": true,
        "result": { "message_id": 1, "chat": { "id": -100 }, "date": 0 }
    }))
}

#[tokio::test]
async fn telegram_posts_to_channel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_json(json!({
            "chat_id": "@aktel_cs2",
            "text": "Team \"<b>Ravens</b>\" registered!",
            "parse_mode": "HTML"
        })))
        .respond_with(sent_message_reply())
        .expect(1)
        .mount(&server)
        .await;

    let client = TelegramClient::new(reqwest::Client::new(), &server.uri(), "test-token");
    let notifier = TelegramChannelNotifier::new(client, "@aktel_cs2", MessageMode::Html);

    notifier
        .send("Team \"<b>Ravens</b>\" registered!")
        .await
        .expect("sending");
}

#[tokio::test]
async fn telegram_error_reply_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let client = TelegramClient::new(reqwest::Client::new(), &server.uri(), "test-token");
    let notifier = TelegramChannelNotifier::new(client, "@missing", MessageMode::Plain);

    let err = notifier.send("hello").await.unwrap_err();
    assert!(
        matches!(&err, NotifyError::Telegram(d) if d == "Bad Request: chat not found"),
        "unexpected error {err:?}"
    );
}

#[tokio::test]
async fn whatsapp_sends_text_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/701322406398011/messages"))
        .and(header("authorization", "Bearer wa-token"))
        .and(body_json(json!({
            "messaging_product": "whatsapp",
            "to": "787471301200",
            "type": "text",
            "text": { "body": "Team \"*Ravens*\" registered!" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = WhatsAppNotifier::new(
        reqwest::Client::new(),
        &server.uri(),
        "701322406398011",
        "wa-token",
        "787471301200",
    );

    notifier
        .send("Team \"*Ravens*\" registered!")
        .await
        .expect("sending");
}

#[tokio::test]
async fn whatsapp_rejection_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let notifier = WhatsAppNotifier::new(
        reqwest::Client::new(),
        &server.uri(),
        "701322406398011",
        "expired",
        "787471301200",
    );

    match notifier.send("hello").await {
        Err(NotifyError::Rejected {
            channel,
            status,
            body,
        }) => {
            assert_eq!(channel, "whatsapp");
            assert_eq!(status, 401);
            assert_eq!(body, "invalid token");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn bot_answers_teams_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .and(body_json(json!({
            "chat_id": 55,
            "text": "No teams have registered yet."
        })))
        .respond_with(sent_message_reply())
        .expect(1)
        .mount(&server)
        .await;

    let client = TelegramClient::new(reqwest::Client::new(), &server.uri(), "bot-token");
    let bot = TelegramBot::new(client, Arc::new(FakeStore::new(StoreBehavior::Accept)));

    let message: Message = serde_json::from_value(json!({
        "message_id": 9,
        "from": { "id": 55, "is_bot": false, "first_name": "Ali" },
        "chat": { "id": 55 },
        "text": "/teams@aktel_bot"
    }))
    .unwrap();

    bot.handle_message(&message).await;
}
