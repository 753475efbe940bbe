//! `SeaORM` entity for the service_providers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProviderType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "service_providers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub provider_type: ProviderType,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::extra_charges::Entity")]
    ExtraCharges,
    #[sea_orm(has_many = "super::farrier_visits::Entity")]
    FarrierVisits,
}

impl Related<super::extra_charges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtraCharges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
