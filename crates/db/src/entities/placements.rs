//! `SeaORM` entity for the placements table.
//!
//! Half-open windows `[start_date, end_date)`; `end_date` NULL while the
//! horse is still at the location. A horse has at most one open placement
//! and no overlapping windows — enforced by the repository before insert.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "placements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub horse_id: Uuid,
    pub location_id: Uuid,
    pub rate_type_id: Uuid,
    pub start_date: Date,
    pub end_date: Option<Date>,
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
        belongs_to = "super::locations::Entity",
        from = "Column::LocationId",
        to = "super::locations::Column::Id"
    )]
    Locations,
    #[sea_orm(
        belongs_to = "super::rate_types::Entity",
        from = "Column::RateTypeId",
        to = "super::rate_types::Column::Id"
    )]
    RateTypes,
}

impl Related<super::horses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Horses.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locations.def()
    }
}

impl Related<super::rate_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RateTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
