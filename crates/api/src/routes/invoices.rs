//! Invoice routes: preview, generate, lifecycle, export document.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use paddock_core::billing::InvoiceError;
use paddock_db::repositories::{GenerateInvoiceInput, InvoiceRepoError, InvoiceRepository};

use crate::AppState;
use crate::routes::{error_response, internal_error};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(generate_invoice))
        .route("/invoices/preview", post(preview_invoice))
        .route("/invoices/{id}", get(get_invoice).delete(delete_draft))
        .route("/invoices/{id}/send", post(send_invoice))
        .route("/invoices/{id}/pay", post(mark_paid))
        .route("/invoices/{id}/document", get(export_document))
}

/// Request body for generating (or previewing) an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateInvoiceRequest {
    /// The owner to bill.
    pub owner_id: Uuid,
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (exclusive).
    pub period_end: NaiveDate,
    /// Free-text notes for the invoice.
    pub notes: Option<String>,
}

/// Query parameters for listing invoices.
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    /// Restrict to one owner.
    pub owner_id: Option<Uuid>,
}

impl GenerateInvoiceRequest {
    fn into_input(self) -> GenerateInvoiceInput {
        GenerateInvoiceInput {
            owner_id: self.owner_id,
            period_start: self.period_start,
            period_end: self.period_end,
            notes: self.notes,
        }
    }
}

/// Maps invoice repository errors onto the JSON error envelope. Domain
/// errors carry their own status codes; conflicts (already billed) come
/// out as 409, validation as 400, lifecycle violations as 422.
fn invoice_error_response(err: InvoiceRepoError) -> axum::response::Response {
    match err {
        InvoiceRepoError::OwnerNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "OWNER_NOT_FOUND", "Owner not found")
        }
        InvoiceRepoError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Invoice not found")
        }
        InvoiceRepoError::Domain(e) => {
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error_response(status, e.error_code(), e.to_string())
        }
        InvoiceRepoError::Settings(e) => {
            error!(error = %e, "Business settings unavailable");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SETTINGS_MISSING",
                "Business settings unavailable",
            )
        }
        InvoiceRepoError::Database(e) => internal_error(e),
    }
}

/// GET `/invoices` - List invoices, newest first.
async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListInvoicesQuery>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.list(query.owner_id).await {
        Ok(items) => (StatusCode::OK, Json(json!({ "invoices": items }))).into_response(),
        Err(e) => invoice_error_response(e),
    }
}

/// POST `/invoices/preview` - Calculate charges without persisting.
async fn preview_invoice(
    State(state): State<AppState>,
    Json(payload): Json<GenerateInvoiceRequest>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.preview(&payload.into_input()).await {
        Ok(built) => (
            StatusCode::OK,
            Json(json!({
                "period_start": built.period.start,
                "period_end": built.period.end,
                "line_items": built.line_items,
                "subtotal": built.subtotal,
                "total": built.total,
            })),
        )
            .into_response(),
        Err(e) => invoice_error_response(e),
    }
}

/// POST `/invoices` - Generate a draft invoice for an owner and period.
async fn generate_invoice(
    State(state): State<AppState>,
    Json(payload): Json<GenerateInvoiceRequest>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.generate(payload.into_input()).await {
        Ok(generated) => {
            info!(
                invoice_id = %generated.invoice.id,
                invoice_number = %generated.invoice.invoice_number,
                "Invoice generated via API"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "invoice": generated.invoice,
                    "line_items": generated.line_items,
                })),
            )
                .into_response()
        }
        Err(e) => invoice_error_response(e),
    }
}

/// GET `/invoices/{id}` - Fetch an invoice with its line items.
async fn get_invoice(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.find_with_lines(id).await {
        Ok(found) => (
            StatusCode::OK,
            Json(json!({
                "invoice": found.invoice,
                "line_items": found.line_items,
            })),
        )
            .into_response(),
        Err(e) => invoice_error_response(e),
    }
}

/// DELETE `/invoices/{id}` - Delete a draft; non-drafts are immutable.
async fn delete_draft(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.delete_draft(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => invoice_error_response(e),
    }
}

/// POST `/invoices/{id}/send` - Issue the invoice, freezing its contents.
async fn send_invoice(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.send(id).await {
        Ok(invoice) => (StatusCode::OK, Json(json!(invoice))).into_response(),
        Err(e) => invoice_error_response(e),
    }
}

/// POST `/invoices/{id}/pay` - Record payment (from sent or overdue).
async fn mark_paid(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.mark_paid(id).await {
        Ok(invoice) => (StatusCode::OK, Json(json!(invoice))).into_response(),
        Err(e) => invoice_error_response(e),
    }
}

/// GET `/invoices/{id}/document` - The export document for PDF/CSV
/// render collaborators.
async fn export_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = InvoiceRepository::new((*state.db).clone());

    match repo.document(id).await {
        Ok(document) => (StatusCode::OK, Json(json!(document))).into_response(),
        Err(e) => invoice_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_conflict_distinct_from_validation() {
        use paddock_shared::types::OwnerId;

        let conflict = invoice_error_response(InvoiceRepoError::Domain(
            InvoiceError::DuplicateInvoice {
                owner_id: OwnerId::new(),
                invoice_number: "INV00001".to_string(),
            },
        ));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let validation = invoice_error_response(InvoiceRepoError::Domain(
            InvoiceError::NothingToBill(OwnerId::new()),
        ));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }
}
