//! Ownership ledger repository.
//!
//! Records which owner a horse belonged to over which half-open window.
//! Overlapping windows for a horse are rejected at creation time using the
//! same validation the placement ledger uses.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use paddock_core::yard::{PlacementError, PlacementSpan, validate_no_overlap};
use paddock_shared::types::{HorseId, PlacementId};

use crate::entities::ownerships;

/// Error types for ownership operations.
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// Ownership record not found.
    #[error("Ownership record not found: {0}")]
    NotFound(Uuid),

    /// The horse has no current owner to transfer from.
    #[error("Horse {0} has no current owner")]
    NoCurrentOwner(Uuid),

    /// Window validation failed (inverted range or overlap).
    #[error(transparent)]
    Window(#[from] PlacementError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording an ownership window.
#[derive(Debug, Clone)]
pub struct RecordOwnershipInput {
    /// The horse.
    pub horse_id: Uuid,
    /// The owner during this window.
    pub owner_id: Uuid,
    /// Window start (inclusive).
    pub start_date: NaiveDate,
    /// Window end (exclusive); `None` while current.
    pub end_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Ownership ledger repository.
#[derive(Debug, Clone)]
pub struct OwnershipRepository {
    db: DatabaseConnection,
}

impl OwnershipRepository {
    /// Creates a new ownership repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an ownership window, rejecting overlap with existing ones.
    ///
    /// # Errors
    ///
    /// Returns `Window` for inverted or overlapping date ranges.
    pub async fn record(
        &self,
        input: RecordOwnershipInput,
    ) -> Result<ownerships::Model, OwnershipError> {
        let existing = ownerships::Entity::find()
            .filter(ownerships::Column::HorseId.eq(input.horse_id))
            .all(&self.db)
            .await?;

        let spans: Vec<PlacementSpan> = existing
            .iter()
            .map(|w| PlacementSpan {
                id: PlacementId::from_uuid(w.id),
                start: w.start_date,
                end: w.end_date,
            })
            .collect();

        validate_no_overlap(
            HorseId::from_uuid(input.horse_id),
            input.start_date,
            input.end_date,
            &spans,
            None,
        )?;

        let now = chrono::Utc::now().into();
        let window = ownerships::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(input.horse_id),
            owner_id: Set(input.owner_id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(window.insert(&self.db).await?)
    }

    /// Transfers a horse to a new owner on a given date: the current
    /// window is closed at `transfer_date` and a new open window begins
    /// there, atomically.
    ///
    /// # Errors
    ///
    /// Returns `NoCurrentOwner` if the horse has no open window.
    pub async fn transfer(
        &self,
        horse_id: Uuid,
        new_owner_id: Uuid,
        transfer_date: NaiveDate,
    ) -> Result<ownerships::Model, OwnershipError> {
        let current = ownerships::Entity::find()
            .filter(ownerships::Column::HorseId.eq(horse_id))
            .filter(ownerships::Column::EndDate.is_null())
            .one(&self.db)
            .await?
            .ok_or(OwnershipError::NoCurrentOwner(horse_id))?;

        if transfer_date <= current.start_date {
            return Err(PlacementError::EndBeforeStart {
                start: current.start_date,
                end: transfer_date,
            }
            .into());
        }

        let txn = self.db.begin().await?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let mut closing: ownerships::ActiveModel = current.into();
        closing.end_date = Set(Some(transfer_date));
        closing.updated_at = Set(now);
        closing.update(&txn).await?;

        let opened = ownerships::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(horse_id),
            owner_id: Set(new_owner_id),
            start_date: Set(transfer_date),
            end_date: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(opened)
    }

    /// Full ownership history for a horse, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history_for_horse(
        &self,
        horse_id: Uuid,
    ) -> Result<Vec<ownerships::Model>, OwnershipError> {
        Ok(ownerships::Entity::find()
            .filter(ownerships::Column::HorseId.eq(horse_id))
            .order_by_desc(ownerships::Column::StartDate)
            .all(&self.db)
            .await?)
    }
}
