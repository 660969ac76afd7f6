use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database Error: {0}")]
    Db(#[from] diesel::result::Error),

    #[error("Database Pool Error: {0}")]
    Pool(#[from] deadpool_diesel::PoolError),

    #[error("Database connection task {0}")]
    Interact(&'static str),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("failed to insert member {index}: {source}")]
    MemberInsert {
        index: usize,
        #[source]
        source: diesel::result::Error,
    },

    #[error("Submission {0} is already registered")]
    DuplicateSubmission(String),
}

impl Error {
    pub fn error_kind(&self) -> &'static str {
        match self {
            Error::Db(_) => "db",
            Error::Pool(_) => "db_pool",
            Error::Interact(_) => "db",
            Error::Migration(_) => "db_migration",
            Error::MemberInsert { .. } => "member_insert",
            Error::DuplicateSubmission(_) => "duplicate_submission",
        }
    }
}

impl From<deadpool_diesel::InteractError> for Error {
    fn from(e: deadpool_diesel::InteractError) -> Self {
        match e {
            deadpool_diesel::InteractError::Panic(_) => Error::Interact("panicked"),
            deadpool_diesel::InteractError::Aborted => Error::Interact("was aborted"),
        }
    }
}
