//! Extra charge ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use paddock_db::entities::sea_orm_active_enums::ChargeType;
use paddock_db::repositories::{
    CreateExtraChargeInput, ExtraChargeError, ExtraChargeRepository,
};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the extra charge routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/extra-charges", post(create_extra_charge))
        .route("/owners/{id}/extra-charges", get(list_for_owner))
}

/// Request body for creating an extra charge.
#[derive(Debug, Deserialize)]
pub struct CreateExtraChargeRequest {
    /// The horse the charge relates to.
    pub horse_id: Uuid,
    /// Who pays for the charge.
    pub owner_id: Uuid,
    /// Provider that performed the work.
    pub service_provider_id: Option<Uuid>,
    /// Charge classification.
    pub charge_type: ChargeType,
    /// Date the charge was incurred.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Fixed amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// POST `/extra-charges` - Record an ad-hoc billable item.
async fn create_extra_charge(
    State(state): State<AppState>,
    Json(payload): Json<CreateExtraChargeRequest>,
) -> impl IntoResponse {
    let repo = ExtraChargeRepository::new((*state.db).clone());
    let input = CreateExtraChargeInput {
        horse_id: payload.horse_id,
        owner_id: payload.owner_id,
        service_provider_id: payload.service_provider_id,
        charge_type: payload.charge_type,
        date: payload.date,
        description: payload.description,
        amount: payload.amount,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(charge) => {
            info!(charge_id = %charge.id, amount = %charge.amount, "Extra charge recorded");
            (StatusCode::CREATED, Json(json!(charge))).into_response()
        }
        Err(ExtraChargeError::NegativeAmount) => error_response(
            StatusCode::BAD_REQUEST,
            "NEGATIVE_AMOUNT",
            "Charge amount cannot be negative",
        ),
        Err(e) => internal_error(e),
    }
}

/// GET `/owners/{id}/extra-charges` - Charges payable by an owner.
async fn list_for_owner(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = ExtraChargeRepository::new((*state.db).clone());

    match repo.list_for_owner(id).await {
        Ok(charges) => (StatusCode::OK, Json(json!({ "extra_charges": charges }))).into_response(),
        Err(e) => internal_error(e),
    }
}
