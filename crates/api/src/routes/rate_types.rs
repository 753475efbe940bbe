//! Rate catalog routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use paddock_db::entities::sea_orm_active_enums::RateBasis;
use paddock_db::repositories::{CreateRateTypeInput, RateTypeRepository};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the rate catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rate-types", get(list_rate_types).post(create_rate_type))
        .route("/rate-types/{id}", get(get_rate_type))
}

/// Request body for creating a rate type.
#[derive(Debug, Deserialize)]
pub struct CreateRateTypeRequest {
    /// Display name, e.g. "Stabled".
    pub name: String,
    /// Charging basis.
    pub basis: RateBasis,
    /// Per-day or per-month amount.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
}

/// GET `/rate-types` - List the rate catalog, cheapest first.
async fn list_rate_types(State(state): State<AppState>) -> impl IntoResponse {
    let repo = RateTypeRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(items) => (StatusCode::OK, Json(json!({ "rate_types": items }))).into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST `/rate-types` - Create a rate type.
async fn create_rate_type(
    State(state): State<AppState>,
    Json(payload): Json<CreateRateTypeRequest>,
) -> impl IntoResponse {
    if payload.amount.is_sign_negative() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Rate amount must not be negative",
        );
    }

    let repo = RateTypeRepository::new((*state.db).clone());
    let input = CreateRateTypeInput {
        name: payload.name,
        basis: payload.basis,
        amount: payload.amount,
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(rate_type) => {
            info!(rate_type_id = %rate_type.id, "Rate type created");
            (StatusCode::CREATED, Json(json!(rate_type))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/rate-types/{id}` - Fetch one rate type.
async fn get_rate_type(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = RateTypeRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(rate_type)) => (StatusCode::OK, Json(json!(rate_type))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Rate type not found"),
        Err(e) => internal_error(e),
    }
}
