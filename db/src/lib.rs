mod enums;
mod error;
mod schema;

pub mod members;
pub mod registrations;
pub mod submissions;
pub mod teams;
pub mod tournaments;
pub mod users;

pub use diesel::result::Error as DieselError;
pub use enums::*;
pub use error::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{Connection, PgConnection, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use tracing::{event, Level};

pub type Pool = deadpool_diesel::postgres::Pool;
pub type PoolBuildError = deadpool::managed::BuildError<deadpool_diesel::Error>;

pub const MIGRATIONS: EmbeddedMigrations = diesel_migrations::embed_migrations!();

pub fn connect(conn_str: &str, max_connections: usize) -> Result<Pool, PoolBuildError> {
    let manager =
        deadpool_diesel::postgres::Manager::new(conn_str, deadpool_diesel::Runtime::Tokio1);
    Pool::builder(manager).max_size(max_connections).build()
}

/// Apply any migrations that have not been run on this database yet.
pub async fn run_migrations(pool: &Pool) -> Result<(), Error> {
    let applied = pool
        .interact(|conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(|e| Error::Migration(e.to_string()))
        })
        .await?;

    event!(Level::INFO, applied, "database migrations complete");
    Ok(())
}

/// Returns true if a connection can be checked out and answers a trivial query.
pub async fn ping(pool: &Pool) -> bool {
    pool.interact(|conn| {
        diesel::sql_query("SELECT 1")
            .execute(conn)
            .map_err(Error::from)
    })
    .await
    .is_ok()
}

/// The value stored for a timestamp the form left empty or sent in a format we
/// could not read.
pub fn unset_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

#[async_trait]
pub trait PoolExt<F, RETVAL, ERR>
where
    F: (FnOnce(&mut PgConnection) -> Result<RETVAL, ERR>) + Send + 'static,
    RETVAL: Send + 'static,
    ERR: Send + 'static,
{
    async fn interact(&self, f: F) -> Result<RETVAL, ERR>;
    async fn transaction(&self, f: F) -> Result<RETVAL, ERR>;
}

#[async_trait]
impl<F, RETVAL, ERR> PoolExt<F, RETVAL, ERR> for Pool
where
    F: (FnOnce(&mut PgConnection) -> Result<RETVAL, ERR>) + Send + 'static,
    RETVAL: Send + 'static,
    ERR: From<diesel::result::Error>
        + From<deadpool_diesel::PoolError>
        + From<deadpool_diesel::InteractError>
        + Send
        + 'static,
{
    async fn interact(&self, f: F) -> Result<RETVAL, ERR> {
        let conn = self.get().await?;
        conn.interact(move |conn| f(conn)).await?
    }

    async fn transaction(&self, f: F) -> Result<RETVAL, ERR> {
        let conn = self.get().await?;
        conn.interact(move |conn| conn.transaction(move |conn| f(conn)))
            .await?
    }
}
