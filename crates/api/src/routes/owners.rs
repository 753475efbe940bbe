//! Owner management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use paddock_db::repositories::{CreateOwnerInput, OwnerError, OwnerRepository, UpdateOwnerInput};
use paddock_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the owner routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/owners", get(list_owners).post(create_owner))
        .route("/owners/{id}", get(get_owner).put(update_owner))
        .route("/owners/{id}/deactivate", post(deactivate_owner))
}

/// Request body for creating an owner.
#[derive(Debug, Deserialize)]
pub struct CreateOwnerRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Account code for external accounting systems.
    pub account_code: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for updating an owner. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateOwnerRequest {
    /// New display name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

/// GET `/owners` - List active owners, paged.
async fn list_owners(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = OwnerRepository::new((*state.db).clone());

    match repo.list(&page).await {
        Ok((items, total)) => {
            (StatusCode::OK, Json(json!(PageResponse::new(items, &page, total)))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/owners` - Create an owner.
async fn create_owner(
    State(state): State<AppState>,
    Json(payload): Json<CreateOwnerRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Owner name must not be empty",
        );
    }

    let repo = OwnerRepository::new((*state.db).clone());
    let input = CreateOwnerInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
        account_code: payload.account_code,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(owner) => {
            info!(owner_id = %owner.id, "Owner created");
            (StatusCode::CREATED, Json(json!(owner))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/owners/{id}` - Fetch one owner.
async fn get_owner(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = OwnerRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(owner)) => (StatusCode::OK, Json(json!(owner))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Owner not found"),
        Err(e) => internal_error(e),
    }
}

/// PUT `/owners/{id}` - Update an owner.
async fn update_owner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOwnerRequest>,
) -> impl IntoResponse {
    let repo = OwnerRepository::new((*state.db).clone());
    let input = UpdateOwnerInput {
        name: payload.name,
        email: payload.email.map(Some),
        phone: payload.phone.map(Some),
        address: payload.address.map(Some),
        account_code: None,
        notes: payload.notes.map(Some),
    };

    match repo.update(id, input).await {
        Ok(owner) => (StatusCode::OK, Json(json!(owner))).into_response(),
        Err(OwnerError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Owner not found")
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/owners/{id}/deactivate` - Soft-delete an owner.
async fn deactivate_owner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = OwnerRepository::new((*state.db).clone());

    match repo.deactivate(id).await {
        Ok(owner) => {
            info!(owner_id = %owner.id, "Owner deactivated");
            (StatusCode::OK, Json(json!(owner))).into_response()
        }
        Err(OwnerError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Owner not found")
        }
        Err(e) => internal_error(e),
    }
}
