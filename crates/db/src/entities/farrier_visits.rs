//! `SeaORM` entity for the farrier_visits table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::FarrierWork;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "farrier_visits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub horse_id: Uuid,
    pub service_provider_id: Option<Uuid>,
    pub date: Date,
    pub work_done: FarrierWork,
    pub next_due_date: Date,
    pub cost: Decimal,
    /// Extra charge raised for this visit, if billed on.
    pub extra_charge_id: Option<Uuid>,
    pub notes: Option<String>,
    /// Date the due reminder last went out; the per-day send guard.
    pub reminder_sent_on: Option<Date>,
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
        belongs_to = "super::service_providers::Entity",
        from = "Column::ServiceProviderId",
        to = "super::service_providers::Column::Id"
    )]
    ServiceProviders,
}

impl Related<super::horses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Horses.def()
    }
}

impl Related<super::service_providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceProviders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
