//! The exported invoice document.
//!
//! Rendering (PDF/CSV) happens outside this system; collaborators receive
//! this serializable snapshot of everything a rendered invoice needs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use paddock_shared::types::{InvoiceId, OwnerId};

use super::builder::LineItem;
use super::lifecycle::InvoiceStatus;
use super::period::BillingPeriod;

/// Business letterhead details printed on every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letterhead {
    /// Trading name.
    pub business_name: String,
    /// Postal address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// VAT registration number, or "N/A".
    pub vat_registration: String,
    /// Bank details for payment.
    pub bank_details: String,
}

/// A finished invoice handed to export/render collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// The invoice.
    pub invoice_id: InvoiceId,
    /// Invoice number, e.g. "INV00042".
    pub invoice_number: String,
    /// Current lifecycle status.
    pub status: InvoiceStatus,
    /// The billed owner.
    pub owner_id: OwnerId,
    /// Owner display name.
    pub owner_name: String,
    /// Owner postal address.
    pub owner_address: String,
    /// Billing period.
    pub period: BillingPeriod,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Ordered line items.
    pub line_items: Vec<LineItem>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Invoice total.
    pub total: Decimal,
    /// Free-text notes.
    pub notes: String,
    /// Business letterhead.
    pub letterhead: Letterhead,
}
