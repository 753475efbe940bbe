//! Business settings routes: letterhead, payment terms, invoice numbering.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use paddock_db::repositories::{HealthRepository, SettingsError, SettingsRepository, UpdateSettingsInput};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the settings routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route("/vaccination-types", get(list_vaccination_types))
}

/// Request body for updating business settings. Absent fields unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    /// Trading name.
    pub business_name: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// VAT registration number.
    pub vat_registration: Option<String>,
    /// Bank details for payment.
    pub bank_details: Option<String>,
    /// Default payment terms in days.
    pub default_payment_terms_days: Option<i16>,
    /// Invoice number prefix.
    pub invoice_prefix: Option<String>,
}

/// GET `/settings` - The business settings singleton.
async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    let repo = SettingsRepository::new((*state.db).clone());

    match repo.get().await {
        Ok(settings) => (StatusCode::OK, Json(json!(settings))).into_response(),
        Err(SettingsError::Missing) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "SETTINGS_MISSING",
            "Business settings unavailable; run migrations",
        ),
        Err(e) => internal_error(e),
    }
}

/// PUT `/settings` - Update the business settings singleton.
async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    let repo = SettingsRepository::new((*state.db).clone());
    let input = UpdateSettingsInput {
        business_name: payload.business_name,
        address: payload.address.map(Some),
        phone: payload.phone.map(Some),
        email: payload.email.map(Some),
        vat_registration: payload.vat_registration,
        bank_details: payload.bank_details.map(Some),
        default_payment_terms_days: payload.default_payment_terms_days,
        invoice_prefix: payload.invoice_prefix,
    };

    match repo.update(input).await {
        Ok(settings) => {
            info!("Business settings updated");
            (StatusCode::OK, Json(json!(settings))).into_response()
        }
        Err(SettingsError::Missing) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "SETTINGS_MISSING",
            "Business settings unavailable; run migrations",
        ),
        Err(e) => internal_error(e),
    }
}

/// GET `/vaccination-types` - The vaccination catalog for health records.
async fn list_vaccination_types(State(state): State<AppState>) -> impl IntoResponse {
    let repo = HealthRepository::new((*state.db).clone());

    match repo.list_vaccination_types().await {
        Ok(items) => {
            (StatusCode::OK, Json(json!({ "vaccination_types": items }))).into_response()
        }
        Err(e) => internal_error(e),
    }
}
