//! `SeaORM` entity for the horses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::HorseSex;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "horses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: Option<Date>,
    /// Age in years, used when the date of birth is unknown.
    pub age_years: Option<i16>,
    pub color: Option<String>,
    pub sex: Option<HorseSex>,
    /// Sire/dam information (free text).
    pub breeding_notes: Option<String>,
    pub sire_name: Option<String>,
    pub passport_number: Option<String>,
    pub has_passport: bool,
    pub notes: Option<String>,
    /// False once the horse has left the yard permanently.
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ownerships::Entity")]
    Ownerships,
    #[sea_orm(has_many = "super::placements::Entity")]
    Placements,
    #[sea_orm(has_many = "super::extra_charges::Entity")]
    ExtraCharges,
    #[sea_orm(has_many = "super::vaccinations::Entity")]
    Vaccinations,
    #[sea_orm(has_many = "super::farrier_visits::Entity")]
    FarrierVisits,
}

impl Related<super::ownerships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ownerships.def()
    }
}

impl Related<super::placements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Placements.def()
    }
}

impl Related<super::vaccinations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vaccinations.def()
    }
}

impl Related<super::farrier_visits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarrierVisits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
