//! Location management routes.

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

use paddock_db::repositories::{CreateLocationInput, LocationRepository};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the location routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/{id}", get(get_location))
}

/// Request body for creating a location.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    /// Field or stable name.
    pub name: String,
    /// Main site name.
    pub site: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Maximum number of horses, if capped.
    pub capacity: Option<i32>,
}

/// GET `/locations` - List active locations grouped by site order.
async fn list_locations(State(state): State<AppState>) -> impl IntoResponse {
    let repo = LocationRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(items) => (StatusCode::OK, Json(json!({ "locations": items }))).into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST `/locations` - Create a location.
async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() || payload.site.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Location name and site must not be empty",
        );
    }

    let repo = LocationRepository::new((*state.db).clone());
    let input = CreateLocationInput {
        name: payload.name,
        site: payload.site,
        description: payload.description,
        capacity: payload.capacity,
    };

    match repo.create(input).await {
        Ok(location) => {
            info!(location_id = %location.id, "Location created");
            (StatusCode::CREATED, Json(json!(location))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/locations/{id}` - Fetch one location with its occupancy.
async fn get_location(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = LocationRepository::new((*state.db).clone());

    let location = match repo.find_by_id(id).await {
        Ok(Some(location)) => location,
        Ok(None) => {
            return error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Location not found");
        }
        Err(e) => return internal_error(e),
    };

    let occupied = match repo.current_horse_count(id).await {
        Ok(count) => count,
        Err(e) => return internal_error(e),
    };

    let available = location
        .capacity
        .map(|capacity| i64::from(capacity) - i64::try_from(occupied).unwrap_or(i64::MAX));

    (
        StatusCode::OK,
        Json(json!({
            "location": location,
            "occupied": occupied,
            "available": available,
        })),
    )
        .into_response()
}
