use aktel_db::{
    registrations::{ApplyOutcome, Registration},
    users::NewTelegramUser,
    Pool,
};
use async_trait::async_trait;

/// The persistence operations the HTTP handlers and the bot need.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn apply_submission(&self, registration: Registration)
        -> Result<ApplyOutcome, aktel_db::Error>;

    async fn save_telegram_user(&self, user: NewTelegramUser) -> Result<(), aktel_db::Error>;

    /// `None` when no tournament is active.
    async fn registered_team_names(&self) -> Result<Option<Vec<String>>, aktel_db::Error>;

    async fn healthy(&self) -> bool;
}

#[async_trait]
impl RegistrationStore for Pool {
    async fn apply_submission(
        &self,
        registration: Registration,
    ) -> Result<ApplyOutcome, aktel_db::Error> {
        aktel_db::registrations::apply_submission(self, registration).await
    }

    async fn save_telegram_user(&self, user: NewTelegramUser) -> Result<(), aktel_db::Error> {
        aktel_db::users::save_telegram_user(self, user).await
    }

    async fn registered_team_names(&self) -> Result<Option<Vec<String>>, aktel_db::Error> {
        aktel_db::tournaments::registered_team_names(self).await
    }

    async fn healthy(&self) -> bool {
        aktel_db::ping(self).await
    }
}
