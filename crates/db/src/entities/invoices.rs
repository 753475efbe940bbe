//! `SeaORM` entity for the invoices table.
//!
//! The billing period is half-open `[period_start, period_end)`. A partial
//! unique index over non-draft invoices enforces one invoice per
//! owner/period; the repository additionally rejects overlapping periods
//! before generation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InvoiceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub period_start: Date,
    pub period_end: Date,
    pub status: InvoiceStatus,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub payment_terms_days: i16,
    pub due_date: Date,
    pub notes: Option<String>,
    /// Date an overdue reminder last went out; the per-day send guard.
    pub reminder_sent_on: Option<Date>,
    pub sent_at: Option<DateTimeWithTimeZone>,
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::OwnerId",
        to = "super::owners::Column::Id"
    )]
    Owners,
    #[sea_orm(has_many = "super::invoice_line_items::Entity")]
    InvoiceLineItems,
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owners.def()
    }
}

impl Related<super::invoice_line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceLineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
