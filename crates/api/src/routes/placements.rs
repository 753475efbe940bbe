//! Placement ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use paddock_db::repositories::{
    CreatePlacementInput, PlacementRepoError, PlacementRepository,
};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the placement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/placements", post(create_placement))
        .route("/horses/{id}/placements", get(placement_history))
        .route("/horses/{id}/move", post(move_horse))
        .route("/horses/{id}/end-placement", post(end_placement))
}

/// Request body for creating a placement.
#[derive(Debug, Deserialize)]
pub struct CreatePlacementRequest {
    /// The horse.
    pub horse_id: Uuid,
    /// Where the horse is kept.
    pub location_id: Uuid,
    /// Rate type the placement is charged under.
    pub rate_type_id: Uuid,
    /// Window start (inclusive).
    pub start_date: NaiveDate,
    /// Window end (exclusive); absent while current.
    pub end_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for moving a horse.
#[derive(Debug, Deserialize)]
pub struct MoveHorseRequest {
    /// The destination location.
    pub location_id: Uuid,
    /// Rate type at the destination.
    pub rate_type_id: Uuid,
    /// Move date: old placement closes and new one opens here.
    pub move_date: NaiveDate,
}

/// Request body for ending a placement.
#[derive(Debug, Deserialize)]
pub struct EndPlacementRequest {
    /// First day the horse is no longer placed.
    pub end_date: NaiveDate,
}

/// POST `/placements` - Create a placement. Overlapping windows for the
/// same horse are rejected here, never resolved at billing time.
async fn create_placement(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlacementRequest>,
) -> impl IntoResponse {
    let repo = PlacementRepository::new((*state.db).clone());
    let input = CreatePlacementInput {
        horse_id: payload.horse_id,
        location_id: payload.location_id,
        rate_type_id: payload.rate_type_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(placement) => {
            info!(placement_id = %placement.id, horse_id = %placement.horse_id, "Placement created");
            (StatusCode::CREATED, Json(json!(placement))).into_response()
        }
        Err(PlacementRepoError::Window(e)) => {
            error_response(StatusCode::BAD_REQUEST, e.error_code(), e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/horses/{id}/placements` - Placement history, newest first.
async fn placement_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PlacementRepository::new((*state.db).clone());

    match repo.history_for_horse(id).await {
        Ok(history) => (StatusCode::OK, Json(json!({ "placements": history }))).into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/move` - Move a horse to a new location. The two
/// resulting segments share no chargeable day.
async fn move_horse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MoveHorseRequest>,
) -> impl IntoResponse {
    let repo = PlacementRepository::new((*state.db).clone());

    match repo
        .move_horse(
            id,
            payload.location_id,
            payload.rate_type_id,
            payload.move_date,
        )
        .await
    {
        Ok(placement) => {
            info!(horse_id = %id, location_id = %payload.location_id, "Horse moved");
            (StatusCode::CREATED, Json(json!(placement))).into_response()
        }
        Err(PlacementRepoError::NoOpenPlacement(_)) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "NO_OPEN_PLACEMENT",
            "Horse has no open placement to move from",
        ),
        Err(PlacementRepoError::Window(e)) => {
            error_response(StatusCode::BAD_REQUEST, e.error_code(), e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/end-placement` - End the horse's open placement.
async fn end_placement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EndPlacementRequest>,
) -> impl IntoResponse {
    let repo = PlacementRepository::new((*state.db).clone());

    match repo.end_placement(id, payload.end_date).await {
        Ok(placement) => (StatusCode::OK, Json(json!(placement))).into_response(),
        Err(PlacementRepoError::NoOpenPlacement(_)) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "NO_OPEN_PLACEMENT",
            "Horse has no open placement to end",
        ),
        Err(PlacementRepoError::Window(e)) => {
            error_response(StatusCode::BAD_REQUEST, e.error_code(), e.to_string())
        }
        Err(e) => internal_error(e),
    }
}
