//! Extra charge ledger repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{extra_charges, sea_orm_active_enums::ChargeType};

/// Error types for extra charge operations.
#[derive(Debug, thiserror::Error)]
pub enum ExtraChargeError {
    /// Extra charge not found.
    #[error("Extra charge not found: {0}")]
    NotFound(Uuid),

    /// Charge amounts cannot be negative.
    #[error("Charge amount cannot be negative")]
    NegativeAmount,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an extra charge.
#[derive(Debug, Clone)]
pub struct CreateExtraChargeInput {
    /// The horse the charge relates to.
    pub horse_id: Uuid,
    /// Who pays for the charge.
    pub owner_id: Uuid,
    /// Provider that performed the work, if recorded.
    pub service_provider_id: Option<Uuid>,
    /// Charge classification.
    pub charge_type: ChargeType,
    /// Date the charge was incurred.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Fixed amount.
    pub amount: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Extra charge ledger repository.
#[derive(Debug, Clone)]
pub struct ExtraChargeRepository {
    db: DatabaseConnection,
}

impl ExtraChargeRepository {
    /// Creates a new extra charge repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an extra charge.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` for negative amounts.
    pub async fn create(
        &self,
        input: CreateExtraChargeInput,
    ) -> Result<extra_charges::Model, ExtraChargeError> {
        if input.amount.is_sign_negative() {
            return Err(ExtraChargeError::NegativeAmount);
        }

        let now = chrono::Utc::now().into();
        let charge = extra_charges::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(input.horse_id),
            owner_id: Set(input.owner_id),
            service_provider_id: Set(input.service_provider_id),
            charge_type: Set(input.charge_type),
            date: Set(input.date),
            description: Set(input.description),
            amount: Set(input.amount),
            invoiced: Set(false),
            invoice_id: Set(None),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(charge.insert(&self.db).await?)
    }

    /// Finds an extra charge by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<extra_charges::Model>, ExtraChargeError> {
        Ok(extra_charges::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists charges for an owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<extra_charges::Model>, ExtraChargeError> {
        Ok(extra_charges::Entity::find()
            .filter(extra_charges::Column::OwnerId.eq(owner_id))
            .order_by_desc(extra_charges::Column::Date)
            .all(&self.db)
            .await?)
    }

    /// Unbilled charges for an owner dated within `[period_start,
    /// period_end)` — the invoice builder's inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unbilled_in_period<C: ConnectionTrait>(
        conn: &C,
        owner_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Vec<extra_charges::Model>, DbErr> {
        extra_charges::Entity::find()
            .filter(extra_charges::Column::OwnerId.eq(owner_id))
            .filter(extra_charges::Column::Invoiced.eq(false))
            .filter(extra_charges::Column::Date.gte(period_start))
            .filter(extra_charges::Column::Date.lt(period_end))
            .order_by_asc(extra_charges::Column::Date)
            .all(conn)
            .await
    }
}
