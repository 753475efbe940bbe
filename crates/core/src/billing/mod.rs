//! Billing logic.
//!
//! This module implements the calculation core of the system:
//! - Billing periods (half-open date ranges, calendar months)
//! - Date-overlap proration for livery charges
//! - The invoice builder (placements + extra charges -> line items + total)
//! - The invoice lifecycle state machine
//! - The exported invoice document for render collaborators

pub mod builder;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod period;
pub mod proration;

#[cfg(test)]
mod proration_props;

pub use builder::{
    BuiltInvoice, ExtraChargeInput, InvoiceBuilder, LineItem, LineType, PlacementSegment,
};
pub use document::{InvoiceDocument, Letterhead};
pub use error::InvoiceError;
pub use lifecycle::{InvoiceStatus, validate_can_delete, validate_status_transition};
pub use period::BillingPeriod;
pub use proration::{chargeable_days, livery_charge, range_overlap, spans_overlap};
