use std::sync::{Arc, Mutex};

use aktel_api::{
    notify::{Notifier, NotifyError, SharedNotifier},
    registration::MessageMode,
    shared_state::InnerState,
    store::RegistrationStore,
    Server,
};
use aktel_db::{
    registrations::{ApplyOutcome, Registration},
    users::NewTelegramUser,
};
use anyhow::Result;
use async_trait::async_trait;
use futures::Future;
use once_cell::sync::Lazy;

/// How the fake store answers `apply_submission`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBehavior {
    Accept,
    Duplicate,
    /// Fail as if the third member's insert was rejected.
    FailMember,
}

pub struct FakeStore {
    pub behavior: StoreBehavior,
    pub registrations: Mutex<Vec<Registration>>,
}

impl FakeStore {
    pub fn new(behavior: StoreBehavior) -> FakeStore {
        FakeStore {
            behavior,
            registrations: Mutex::new(Vec::new()),
        }
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrationStore for FakeStore {
    async fn apply_submission(
        &self,
        registration: Registration,
    ) -> Result<ApplyOutcome, aktel_db::Error> {
        match self.behavior {
            StoreBehavior::Accept => {
                self.registrations.lock().unwrap().push(registration);
                Ok(ApplyOutcome::Registered { team_id: 1 })
            }
            StoreBehavior::Duplicate => Ok(ApplyOutcome::AlreadyRegistered),
            StoreBehavior::FailMember => Err(aktel_db::Error::MemberInsert {
                index: 2,
                source: aktel_db::DieselError::RollbackTransaction,
            }),
        }
    }

    async fn save_telegram_user(&self, _user: NewTelegramUser) -> Result<(), aktel_db::Error> {
        Ok(())
    }

    async fn registered_team_names(&self) -> Result<Option<Vec<String>>, aktel_db::Error> {
        Ok(Some(Vec::new()))
    }

    async fn healthy(&self) -> bool {
        true
    }
}

/// A notifier that remembers every message it was asked to send.
pub struct RecordingNotifier {
    pub name: &'static str,
    pub mode: MessageMode,
    pub sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(name: &'static str, mode: MessageMode) -> Arc<RecordingNotifier> {
        Arc::new(RecordingNotifier {
            name,
            mode,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &str {
        self.name
    }

    fn mode(&self) -> MessageMode {
        self.mode
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct TestApp {
    pub store: Arc<FakeStore>,
    pub whatsapp: Arc<RecordingNotifier>,
    pub telegram: Arc<RecordingNotifier>,
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn start_app(behavior: StoreBehavior, production: bool) -> Result<TestApp> {
    Lazy::force(&aktel_test::TRACING);

    let store = Arc::new(FakeStore::new(behavior));
    let whatsapp = RecordingNotifier::new("whatsapp", MessageMode::WhatsApp);
    let telegram = RecordingNotifier::new("telegram", MessageMode::Html);

    let notifiers: Vec<SharedNotifier> = vec![whatsapp.clone(), telegram.clone()];
    let state = Arc::new(InnerState {
        production,
        store: store.clone(),
        notifiers,
        tournament_id: 1,
    });

    // Bind to a random port
    let server: Server = aktel_api::bind_server(state, production, "127.0.0.1", 0)?;
    let base_url = format!("http://{}:{}", server.host, server.port);
    tokio::task::spawn(server.server);

    Ok(TestApp {
        store,
        whatsapp,
        telegram,
        client: reqwest::ClientBuilder::new()
            .timeout(std::time::Duration::from_secs(30))
            .build()?,
        base_url,
    })
}

pub async fn run_app_test<F, R>(behavior: StoreBehavior, f: F)
where
    F: FnOnce(TestApp) -> R,
    R: Future<Output = Result<(), anyhow::Error>>,
{
    let app = start_app(behavior, false).expect("Starting app");
    f(app).await.unwrap();
}

/// Like [run_app_test], but with the server in production mode.
pub async fn run_production_app_test<F, R>(behavior: StoreBehavior, f: F)
where
    F: FnOnce(TestApp) -> R,
    R: Future<Output = Result<(), anyhow::Error>>,
{
    let app = start_app(behavior, true).expect("Starting app");
    f(app).await.unwrap();
}

/// A complete form submission as the form service posts it.
pub fn submission_body() -> serde_json::Value {
    serde_json::json!({
        "Submission Date": "2025-06-01T10:00:00Z",
        "Team name": "Ravens",
        "Captain - First Name": "Ali",
        "Captain - Last Name": "Ivanov",
        "Captain - Grad. Year": 2025,
        "Phone Number": "87011234567",
        "FastCup Link": "https://cs2.fastcup.net/id1",
        "Member 2 - First Name": "Dana",
        "Member 2 - Last Name": "Serik",
        "Member 2 - Grad. Year": 2026,
        "Member 3 - First Name": "Erlan",
        "Member 3 - Last Name": "Bek",
        "Member 3 - Grad. Year": 2024,
        "Member 4 - First Name": "Timur",
        "Member 4 - Last Name": "Akhmet",
        "Member 4 - Grad. Year": 2025,
        "Member 5 - First Name": "Aru",
        "Member 5 - Last Name": "Nur",
        "Member 5 - Grad. Year": 2027,
        "Team logo": "https://example.com/logo.png",
        "Submission IP": "10.0.0.1",
        "Submission URL": "https://forms.example.com/s/1",
        "Submission Edit URL": "https://forms.example.com/s/1/edit",
        "Submission ID": "sub-1"
    })
}
