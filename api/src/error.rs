use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{event, Level};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid registration body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error(transparent)]
    Db(#[from] aktel_db::Error),

    #[error("Database Pool Error: {0}")]
    DbPoolBuild(#[from] aktel_db::PoolBuildError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("Server error: {0}")]
    ServerError(#[from] hyper::Error),

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Generic(#[from] anyhow::Error),
}

impl Error {
    fn error_kind(&self) -> &'static str {
        match self {
            Error::InvalidBody(_) => "bad_request",
            Error::Db(e) => e.error_kind(),
            Error::DbPoolBuild(_) => "db_pool",
            Error::Config(_) => "config",
            Error::ServerError(_) => "internal_server_error",
            Error::NotFound => "not_found",
            Error::Generic(_) => "internal_server_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response_tuple(&self) -> (StatusCode, ErrorResponseData) {
        (
            self.status_code(),
            ErrorResponseData::new(self.error_kind(), self.to_string()),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (code, json) = self.response_tuple();
        (code, Json(json)).into_response()
    }
}

/// The JSON body of every error response: `{"error": {"kind": ..., "message": ...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponseData {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    kind: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl ErrorResponseData {
    /// Build a response body. Every error that reaches a client is logged here.
    pub fn new(
        kind: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> ErrorResponseData {
        let ret = ErrorResponseData {
            error: ErrorDetails {
                kind: kind.into(),
                message: message.into(),
            },
        };

        event!(Level::ERROR, kind=%ret.error.kind, message=%ret.error.message);

        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_body_is_client_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let (status, body) = Error::InvalidBody(parse_err).response_tuple();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["error"]["kind"], "bad_request");
    }

    #[test]
    fn member_failure_names_index() {
        let err = Error::from(aktel_db::Error::MemberInsert {
            index: 2,
            source: aktel_db::DieselError::NotFound,
        });

        let (status, body) = err.response_tuple();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["error"]["kind"], "member_insert");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("failed to insert member 2"));
    }
}
