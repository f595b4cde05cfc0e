//! Route definitions for the relay API.

pub mod animals;
pub mod health;
pub mod telegram;

use axum::{
    routing::{any, delete, get, post, put},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::AppState;

/// Largest request body accepted, in bytes.
pub const BODY_LIMIT: usize = 64 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/scan-rfid", post(animals::scan))
        .route("/get-data/{uid}", get(animals::get))
        .route("/edit-data/{uid}", put(animals::edit))
        .route("/delete-data/{uid}", delete(animals::delete))
        .route("/get-data", any(animals::missing_uid))
        .route("/get-data/", any(animals::missing_uid))
        .route("/edit-data", any(animals::missing_uid))
        .route("/edit-data/", any(animals::missing_uid))
        .route("/delete-data", any(animals::missing_uid))
        .route("/delete-data/", any(animals::missing_uid));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/telegram/webhook", post(telegram::webhook))
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
