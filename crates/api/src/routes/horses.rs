//! Horse management routes, including health records and ownership
//! history nested under a horse.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
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

use paddock_db::entities::sea_orm_active_enums::{FarrierWork, HorseSex};
use paddock_db::repositories::{
    CreateFarrierVisitInput, CreateHorseInput, CreateVaccinationInput, HealthError,
    HealthRepository, HorseError, HorseRepository, OwnershipError, OwnershipRepository,
    RecordOwnershipInput, UpdateHorseInput,
};
use paddock_shared::types::{PageRequest, PageResponse};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the horse routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/horses", get(list_horses).post(create_horse))
        .route("/horses/{id}", get(get_horse).put(update_horse))
        .route("/horses/{id}/deactivate", post(deactivate_horse))
        .route(
            "/horses/{id}/ownerships",
            get(ownership_history).post(record_ownership),
        )
        .route("/horses/{id}/transfer", post(transfer_ownership))
        .route(
            "/horses/{id}/vaccinations",
            get(list_vaccinations).post(record_vaccination),
        )
        .route(
            "/horses/{id}/farrier-visits",
            get(list_farrier_visits).post(record_farrier_visit),
        )
}

/// Request body for creating a horse.
#[derive(Debug, Deserialize)]
pub struct CreateHorseRequest {
    /// Horse name.
    pub name: String,
    /// Date of birth, if known.
    pub date_of_birth: Option<NaiveDate>,
    /// Age in years when the date of birth is unknown.
    pub age_years: Option<i16>,
    /// Coat color.
    pub color: Option<String>,
    /// Sex.
    pub sex: Option<HorseSex>,
    /// Sire/dam information.
    pub breeding_notes: Option<String>,
    /// Sire name.
    pub sire_name: Option<String>,
    /// Passport number.
    pub passport_number: Option<String>,
    /// Whether the horse has a passport.
    #[serde(default = "default_true")]
    pub has_passport: bool,
    /// Free-text notes.
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Request body for updating a horse.
#[derive(Debug, Deserialize)]
pub struct UpdateHorseRequest {
    /// New name.
    pub name: Option<String>,
    /// New coat color.
    pub color: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New passport number.
    pub passport_number: Option<String>,
}

/// Request body for recording an ownership window.
#[derive(Debug, Deserialize)]
pub struct RecordOwnershipRequest {
    /// The owner during this window.
    pub owner_id: Uuid,
    /// Window start (inclusive).
    pub start_date: NaiveDate,
    /// Window end (exclusive); absent while current.
    pub end_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for transferring a horse to a new owner.
#[derive(Debug, Deserialize)]
pub struct TransferOwnershipRequest {
    /// The new owner.
    pub new_owner_id: Uuid,
    /// Transfer date: old window closes and new one opens here.
    pub transfer_date: NaiveDate,
}

/// Request body for recording a vaccination.
#[derive(Debug, Deserialize)]
pub struct RecordVaccinationRequest {
    /// The vaccination type.
    pub vaccination_type_id: Uuid,
    /// Date the vaccination was given.
    pub date_given: NaiveDate,
    /// Explicit next due date; defaulted from the type's interval.
    pub next_due_date: Option<NaiveDate>,
    /// Vet who administered it.
    pub vet_name: Option<String>,
    /// Vaccine batch number.
    pub batch_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Request body for recording a farrier visit.
#[derive(Debug, Deserialize)]
pub struct RecordFarrierVisitRequest {
    /// Provider that did the work.
    pub service_provider_id: Option<Uuid>,
    /// Visit date.
    pub date: NaiveDate,
    /// Work performed.
    pub work_done: FarrierWork,
    /// Explicit next due date; defaulted to six weeks out.
    pub next_due_date: Option<NaiveDate>,
    /// Cost of the visit.
    pub cost: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// GET `/horses` - List active horses, paged.
async fn list_horses(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = HorseRepository::new((*state.db).clone());

    match repo.list(&page).await {
        Ok((items, total)) => {
            (StatusCode::OK, Json(json!(PageResponse::new(items, &page, total)))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/horses` - Create a horse.
async fn create_horse(
    State(state): State<AppState>,
    Json(payload): Json<CreateHorseRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Horse name must not be empty",
        );
    }

    let repo = HorseRepository::new((*state.db).clone());
    let input = CreateHorseInput {
        name: payload.name,
        date_of_birth: payload.date_of_birth,
        age_years: payload.age_years,
        color: payload.color,
        sex: payload.sex,
        breeding_notes: payload.breeding_notes,
        sire_name: payload.sire_name,
        passport_number: payload.passport_number,
        has_passport: payload.has_passport,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(horse) => {
            info!(horse_id = %horse.id, "Horse created");
            (StatusCode::CREATED, Json(json!(horse))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/horses/{id}` - Fetch one horse with its derived current state.
async fn get_horse(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = HorseRepository::new((*state.db).clone());

    let horse = match repo.find_by_id(id).await {
        Ok(Some(horse)) => horse,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Horse not found"),
        Err(e) => return internal_error(e),
    };

    // Current placement and owner are derived, never stored.
    let placement = match repo.current_placement(id).await {
        Ok(placement) => placement,
        Err(e) => return internal_error(e),
    };
    let owner = match repo.owner_on(id, chrono::Utc::now().date_naive()).await {
        Ok(owner) => owner,
        Err(e) => return internal_error(e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "horse": horse,
            "current_placement": placement,
            "current_owner": owner,
        })),
    )
        .into_response()
}

/// PUT `/horses/{id}` - Update a horse.
async fn update_horse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHorseRequest>,
) -> impl IntoResponse {
    let repo = HorseRepository::new((*state.db).clone());
    let input = UpdateHorseInput {
        name: payload.name,
        color: payload.color.map(Some),
        notes: payload.notes.map(Some),
        passport_number: payload.passport_number.map(Some),
    };

    match repo.update(id, input).await {
        Ok(horse) => (StatusCode::OK, Json(json!(horse))).into_response(),
        Err(HorseError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Horse not found")
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/deactivate` - Mark a horse as permanently departed.
async fn deactivate_horse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = HorseRepository::new((*state.db).clone());

    match repo.deactivate(id).await {
        Ok(horse) => {
            info!(horse_id = %horse.id, "Horse deactivated");
            (StatusCode::OK, Json(json!(horse))).into_response()
        }
        Err(HorseError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Horse not found")
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/horses/{id}/ownerships` - Ownership history, newest first.
async fn ownership_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = OwnershipRepository::new((*state.db).clone());

    match repo.history_for_horse(id).await {
        Ok(history) => (StatusCode::OK, Json(json!({ "ownerships": history }))).into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/ownerships` - Record an ownership window.
async fn record_ownership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordOwnershipRequest>,
) -> impl IntoResponse {
    let repo = OwnershipRepository::new((*state.db).clone());
    let input = RecordOwnershipInput {
        horse_id: id,
        owner_id: payload.owner_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        notes: payload.notes,
    };

    match repo.record(input).await {
        Ok(window) => (StatusCode::CREATED, Json(json!(window))).into_response(),
        Err(OwnershipError::Window(e)) => {
            error_response(StatusCode::BAD_REQUEST, e.error_code(), e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/transfer` - Transfer the horse to a new owner.
async fn transfer_ownership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransferOwnershipRequest>,
) -> impl IntoResponse {
    let repo = OwnershipRepository::new((*state.db).clone());

    match repo
        .transfer(id, payload.new_owner_id, payload.transfer_date)
        .await
    {
        Ok(window) => {
            info!(horse_id = %id, new_owner_id = %payload.new_owner_id, "Horse transferred");
            (StatusCode::CREATED, Json(json!(window))).into_response()
        }
        Err(OwnershipError::NoCurrentOwner(_)) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "NO_CURRENT_OWNER",
            "Horse has no current owner to transfer from",
        ),
        Err(OwnershipError::Window(e)) => {
            error_response(StatusCode::BAD_REQUEST, e.error_code(), e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// GET `/horses/{id}/vaccinations` - Vaccination history, newest first.
async fn list_vaccinations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = HealthRepository::new((*state.db).clone());

    match repo.vaccinations_for_horse(id).await {
        Ok(records) => (StatusCode::OK, Json(json!({ "vaccinations": records }))).into_response(),
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/vaccinations` - Record a vaccination.
async fn record_vaccination(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordVaccinationRequest>,
) -> impl IntoResponse {
    let repo = HealthRepository::new((*state.db).clone());
    let input = CreateVaccinationInput {
        horse_id: id,
        vaccination_type_id: payload.vaccination_type_id,
        date_given: payload.date_given,
        next_due_date: payload.next_due_date,
        vet_name: payload.vet_name,
        batch_number: payload.batch_number,
        notes: payload.notes,
    };

    match repo.record_vaccination(input).await {
        Ok(record) => (StatusCode::CREATED, Json(json!(record))).into_response(),
        Err(HealthError::TypeNotFound(_)) => error_response(
            StatusCode::BAD_REQUEST,
            "UNKNOWN_VACCINATION_TYPE",
            "Vaccination type not found",
        ),
        Err(e) => internal_error(e),
    }
}

/// GET `/horses/{id}/farrier-visits` - Farrier history, newest first.
async fn list_farrier_visits(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = HealthRepository::new((*state.db).clone());

    match repo.farrier_visits_for_horse(id).await {
        Ok(records) => {
            (StatusCode::OK, Json(json!({ "farrier_visits": records }))).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST `/horses/{id}/farrier-visits` - Record a farrier visit.
async fn record_farrier_visit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordFarrierVisitRequest>,
) -> impl IntoResponse {
    let repo = HealthRepository::new((*state.db).clone());
    let input = CreateFarrierVisitInput {
        horse_id: id,
        service_provider_id: payload.service_provider_id,
        date: payload.date,
        work_done: payload.work_done,
        next_due_date: payload.next_due_date,
        cost: payload.cost,
        notes: payload.notes,
    };

    match repo.record_farrier_visit(input).await {
        Ok(record) => (StatusCode::CREATED, Json(json!(record))).into_response(),
        Err(e) => internal_error(e),
    }
}
