//! Rate catalog repository for database operations.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use paddock_core::rates::{Rate, RateBasis};
use paddock_shared::types::RateTypeId;

use crate::entities::{rate_types, sea_orm_active_enums};

/// Error types for rate catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum RateTypeError {
    /// Rate type not found.
    #[error("Rate type not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a rate type.
#[derive(Debug, Clone)]
pub struct CreateRateTypeInput {
    /// Display name, e.g. "Stabled".
    pub name: String,
    /// Charging basis.
    pub basis: sea_orm_active_enums::RateBasis,
    /// Per-day or per-month amount.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
}

/// Rate catalog repository.
#[derive(Debug, Clone)]
pub struct RateTypeRepository {
    db: DatabaseConnection,
}

impl RateTypeRepository {
    /// Creates a new rate catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a rate type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateRateTypeInput,
    ) -> Result<rate_types::Model, RateTypeError> {
        let now = chrono::Utc::now().into();
        let rate_type = rate_types::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            basis: Set(input.basis),
            amount: Set(input.amount),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(rate_type.insert(&self.db).await?)
    }

    /// Finds a rate type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<rate_types::Model>, RateTypeError> {
        Ok(rate_types::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists rate types ordered by amount (cheapest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<rate_types::Model>, RateTypeError> {
        Ok(rate_types::Entity::find()
            .order_by_asc(rate_types::Column::Amount)
            .all(&self.db)
            .await?)
    }

    /// Loads the whole active catalog keyed by rate type ID, for the
    /// invoice builder's lookup closure.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn load_catalog<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<HashMap<Uuid, Rate>, DbErr> {
        let rows = rate_types::Entity::find()
            .filter(rate_types::Column::IsActive.eq(true))
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let basis = match row.basis {
                    sea_orm_active_enums::RateBasis::PerDay => RateBasis::PerDay,
                    sea_orm_active_enums::RateBasis::PerMonth => RateBasis::PerMonth,
                };
                (
                    row.id,
                    Rate {
                        rate_type_id: RateTypeId::from_uuid(row.id),
                        name: row.name,
                        basis,
                        amount: row.amount,
                    },
                )
            })
            .collect())
    }
}
