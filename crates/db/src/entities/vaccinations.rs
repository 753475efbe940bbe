//! `SeaORM` entity for the vaccinations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vaccinations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub horse_id: Uuid,
    pub vaccination_type_id: Uuid,
    pub date_given: Date,
    pub next_due_date: Date,
    pub vet_name: Option<String>,
    pub batch_number: Option<String>,
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
        belongs_to = "super::vaccination_types::Entity",
        from = "Column::VaccinationTypeId",
        to = "super::vaccination_types::Column::Id"
    )]
    VaccinationTypes,
}

impl Related<super::horses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Horses.def()
    }
}

impl Related<super::vaccination_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VaccinationTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
