//! `SeaORM` entity for the business_settings singleton table.
//!
//! Exactly one row (enforced by a CHECK on the primary key); holds the
//! letterhead details and the invoice number sequence.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "business_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i16,
    pub business_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// VAT registration number, or "N/A" if not registered.
    pub vat_registration: String,
    pub bank_details: Option<String>,
    pub default_payment_terms_days: i16,
    pub invoice_prefix: String,
    pub next_invoice_number: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
