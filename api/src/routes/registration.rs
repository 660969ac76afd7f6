use aktel_db::registrations::ApplyOutcome;
use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use bytes::Bytes;
use serde::Serialize;
use tracing::{event, Level};

use crate::{
    error::Error,
    notify::dispatch_registration,
    registration::{map_submission, WireSubmission},
    shared_state::AppState,
};

#[derive(Debug, Serialize)]
struct RegistrationResponse {
    success: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
}

/// Accept a form submission. The team is stored first; the notifications go out
/// only after the transaction commits.
async fn register(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let wire: WireSubmission = serde_json::from_slice(&body).map_err(Error::InvalidBody)?;
    let registration = map_submission(&wire, state.tournament_id);

    let team = registration.team.clone();
    let members = registration.members.clone();

    let status = match state.store.apply_submission(registration).await? {
        ApplyOutcome::Registered { team_id } => {
            event!(Level::INFO, team_id, team = %team.name, "team registered");
            dispatch_registration(&state.notifiers, &team, &members);
            None
        }
        ApplyOutcome::AlreadyRegistered => Some("already_registered"),
    };

    Ok(Json(RegistrationResponse {
        success: "true",
        status,
    }))
}

pub fn configure() -> Router {
    Router::new().route("/aktel-registration", post(register))
}
