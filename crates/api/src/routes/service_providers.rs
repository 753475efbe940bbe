//! Service provider routes (vets, farriers, dentists, ...).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use paddock_db::entities::sea_orm_active_enums::ProviderType;
use paddock_db::repositories::{CreateServiceProviderInput, ServiceProviderRepository};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the service provider routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/service-providers",
            get(list_providers).post(create_provider),
        )
        .route("/service-providers/{id}", get(get_provider))
}

/// Request body for creating a service provider.
#[derive(Debug, Deserialize)]
pub struct CreateServiceProviderRequest {
    /// Display name.
    pub name: String,
    /// Provider category.
    pub provider_type: ProviderType,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// GET `/service-providers` - List active providers by category.
async fn list_providers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ServiceProviderRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(items) => {
            (StatusCode::OK, Json(json!({ "service_providers": items }))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/service-providers` - Create a provider.
async fn create_provider(
    State(state): State<AppState>,
    Json(payload): Json<CreateServiceProviderRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Provider name must not be empty",
        );
    }

    let repo = ServiceProviderRepository::new((*state.db).clone());
    let input = CreateServiceProviderInput {
        name: payload.name,
        provider_type: payload.provider_type,
        phone: payload.phone,
        email: payload.email,
        address: payload.address,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(provider) => {
            info!(provider_id = %provider.id, "Service provider created");
            (StatusCode::CREATED, Json(json!(provider))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/service-providers/{id}` - Fetch one provider.
async fn get_provider(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ServiceProviderRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(provider)) => (StatusCode::OK, Json(json!(provider))).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Service provider not found",
        ),
        Err(e) => internal_error(e),
    }
}
