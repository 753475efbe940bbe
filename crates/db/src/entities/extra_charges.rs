//! `SeaORM` entity for the extra_charges table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ChargeType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "extra_charges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub horse_id: Uuid,
    /// Who pays for this charge.
    pub owner_id: Uuid,
    pub service_provider_id: Option<Uuid>,
    pub charge_type: ChargeType,
    /// Date the charge was incurred.
    pub date: Date,
    pub description: String,
    pub amount: Decimal,
    /// Set once the charge has been put on an invoice.
    pub invoiced: bool,
    pub invoice_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::horses::Entity",
        from = "Column::HorseId",
        to = "super::horses::Column::Id"
    )]
    Horses,
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::OwnerId",
        to = "super::owners::Column::Id"
    )]
    Owners,
    #[sea_orm(
        belongs_to = "super::service_providers::Entity",
        from = "Column::ServiceProviderId",
        to = "super::service_providers::Column::Id"
    )]
    ServiceProviders,
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
}

impl Related<super::horses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Horses.def()
    }
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owners.def()
    }
}

impl Related<super::service_providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceProviders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
