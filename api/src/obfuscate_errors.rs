use axum::{
    body::{boxed, Body},
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::json;

/// Replace the body of server errors with a generic message when `enabled`, so
/// database and upstream details stay in the logs. Headers set further in, such
/// as CORS, are kept.
pub async fn obfuscate_errors(
    State(enabled): State<bool>,
    req: Request<Body>,
    next: Next<Body>,
) -> Response {
    let res = next.run(req).await;
    if !enabled {
        return res;
    }

    let message = match res.status() {
        StatusCode::INTERNAL_SERVER_ERROR => "Internal error",
        StatusCode::BAD_GATEWAY => "Bad gateway",
        _ => return res,
    };

    let body = json!({
        "error": {
            "kind": "internal_server_error",
            "message": message,
        }
    });

    let (mut parts, _) = res.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Response::from_parts(parts, boxed(Body::from(body.to_string())))
}
