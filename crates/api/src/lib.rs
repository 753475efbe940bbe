//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the administrative CRUD surface
//! - Invoice operations (preview, generate, lifecycle, export document)
//! - A JSON error envelope mapped from the domain error types
//!
//! Authentication is handled by the deployment's reverse proxy and is
//! deliberately absent here.

pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use paddock_shared::EmailService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Email service for sending invoices and reminders.
    pub email_service: Arc<EmailService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
