//! API route definitions.

use axum::Json;
use axum::http::StatusCode;
use axum::{Router, response::IntoResponse};
use serde_json::json;

use crate::AppState;

pub mod extra_charges;
pub mod health;
pub mod horses;
pub mod invoices;
pub mod locations;
pub mod owners;
pub mod placements;
pub mod rate_types;
pub mod service_providers;
pub mod settings;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(owners::routes())
        .merge(horses::routes())
        .merge(locations::routes())
        .merge(rate_types::routes())
        .merge(placements::routes())
        .merge(extra_charges::routes())
        .merge(invoices::routes())
        .merge(service_providers::routes())
        .merge(settings::routes())
}

/// Standard JSON error envelope.
pub(crate) fn error_response(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Fallback for unexpected database failures: log, return a 500 without
/// leaking internals.
pub(crate) fn internal_error(err: impl std::fmt::Display) -> axum::response::Response {
    tracing::error!(error = %err, "Unhandled repository error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An error occurred",
    )
}
