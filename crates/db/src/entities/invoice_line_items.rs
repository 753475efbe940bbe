//! `SeaORM` entity for the invoice_line_items table.
//!
//! Line items are derived by the invoice builder and never edited after
//! generation; `line_no` preserves the builder's deterministic order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LineType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub line_no: i32,
    pub horse_id: Option<Uuid>,
    pub placement_id: Option<Uuid>,
    pub extra_charge_id: Option<Uuid>,
    pub line_type: LineType,
    pub description: String,
    /// Day count for livery lines, 1 for extras.
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
    #[sea_orm(
        belongs_to = "super::horses::Entity",
        from = "Column::HorseId",
        to = "super::horses::Column::Id"
    )]
    Horses,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
