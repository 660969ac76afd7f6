use axum::Router;

use crate::Error;

mod health;
mod registration;

async fn not_found() -> Error {
    Error::NotFound
}

pub fn configure_routes(router: Router) -> Router {
    router
        .merge(health::configure())
        .merge(registration::configure())
        .fallback(not_found)
}
