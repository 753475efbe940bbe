//! Placement ledger repository.
//!
//! Overlapping placements for a horse are rejected here, at creation
//! time — billing never has to resolve a double booking.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use paddock_core::yard::{PlacementError, PlacementSpan, validate_no_overlap};
use paddock_shared::types::{HorseId, PlacementId};

use crate::entities::placements;

/// Error types for placement operations.
#[derive(Debug, thiserror::Error)]
pub enum PlacementRepoError {
    /// Placement not found.
    #[error("Placement not found: {0}")]
    NotFound(Uuid),

    /// The horse has no open placement.
    #[error("Horse {0} has no open placement")]
    NoOpenPlacement(Uuid),

    /// Window validation failed (inverted range or overlap).
    #[error(transparent)]
    Window(#[from] PlacementError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a placement.
#[derive(Debug, Clone)]
pub struct CreatePlacementInput {
    /// The horse.
    pub horse_id: Uuid,
    /// Where the horse is kept.
    pub location_id: Uuid,
    /// Rate type the placement is charged under.
    pub rate_type_id: Uuid,
    /// Window start (inclusive).
    pub start_date: NaiveDate,
    /// Window end (exclusive); `None` while current.
    pub end_date: Option<NaiveDate>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Placement ledger repository.
#[derive(Debug, Clone)]
pub struct PlacementRepository {
    db: DatabaseConnection,
}

impl PlacementRepository {
    /// Creates a new placement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a placement, rejecting overlap with the horse's existing
    /// placements.
    ///
    /// # Errors
    ///
    /// Returns `Window` for inverted or overlapping date ranges.
    pub async fn create(
        &self,
        input: CreatePlacementInput,
    ) -> Result<placements::Model, PlacementRepoError> {
        self.validate_window(input.horse_id, input.start_date, input.end_date, None)
            .await?;

        let now = chrono::Utc::now().into();
        let placement = placements::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(input.horse_id),
            location_id: Set(input.location_id),
            rate_type_id: Set(input.rate_type_id),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(placement.insert(&self.db).await?)
    }

    /// Moves a horse: the open placement is closed at `move_date` and a
    /// new open placement begins there, atomically. Produces the two
    /// billing segments with no shared day.
    ///
    /// # Errors
    ///
    /// Returns `NoOpenPlacement` if the horse is not currently placed.
    pub async fn move_horse(
        &self,
        horse_id: Uuid,
        new_location_id: Uuid,
        new_rate_type_id: Uuid,
        move_date: NaiveDate,
    ) -> Result<placements::Model, PlacementRepoError> {
        let current = placements::Entity::find()
            .filter(placements::Column::HorseId.eq(horse_id))
            .filter(placements::Column::EndDate.is_null())
            .one(&self.db)
            .await?
            .ok_or(PlacementRepoError::NoOpenPlacement(horse_id))?;

        if move_date <= current.start_date {
            return Err(PlacementError::EndBeforeStart {
                start: current.start_date,
                end: move_date,
            }
            .into());
        }

        let txn = self.db.begin().await?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let mut closing: placements::ActiveModel = current.into();
        closing.end_date = Set(Some(move_date));
        closing.updated_at = Set(now);
        closing.update(&txn).await?;

        let opened = placements::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(horse_id),
            location_id: Set(new_location_id),
            rate_type_id: Set(new_rate_type_id),
            start_date: Set(move_date),
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

    /// Ends the horse's open placement at `end_date` (horse leaving).
    ///
    /// # Errors
    ///
    /// Returns `NoOpenPlacement` if the horse is not currently placed.
    pub async fn end_placement(
        &self,
        horse_id: Uuid,
        end_date: NaiveDate,
    ) -> Result<placements::Model, PlacementRepoError> {
        let current = placements::Entity::find()
            .filter(placements::Column::HorseId.eq(horse_id))
            .filter(placements::Column::EndDate.is_null())
            .one(&self.db)
            .await?
            .ok_or(PlacementRepoError::NoOpenPlacement(horse_id))?;

        if end_date <= current.start_date {
            return Err(PlacementError::EndBeforeStart {
                start: current.start_date,
                end: end_date,
            }
            .into());
        }

        let mut active: placements::ActiveModel = current.into();
        active.end_date = Set(Some(end_date));
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Placement history for a horse, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn history_for_horse(
        &self,
        horse_id: Uuid,
    ) -> Result<Vec<placements::Model>, PlacementRepoError> {
        Ok(placements::Entity::find()
            .filter(placements::Column::HorseId.eq(horse_id))
            .order_by_desc(placements::Column::StartDate)
            .all(&self.db)
            .await?)
    }

    /// Finds a placement by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<placements::Model>, PlacementRepoError> {
        Ok(placements::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Validates a candidate window against all existing placements for
    /// the horse.
    async fn validate_window(
        &self,
        horse_id: Uuid,
        start: NaiveDate,
        end: Option<NaiveDate>,
        exclude: Option<Uuid>,
    ) -> Result<(), PlacementRepoError> {
        let existing = placements::Entity::find()
            .filter(placements::Column::HorseId.eq(horse_id))
            .all(&self.db)
            .await?;

        let spans: Vec<PlacementSpan> = existing
            .iter()
            .map(|p| PlacementSpan {
                id: PlacementId::from_uuid(p.id),
                start: p.start_date,
                end: p.end_date,
            })
            .collect();

        validate_no_overlap(
            HorseId::from_uuid(horse_id),
            start,
            end,
            &spans,
            exclude.map(PlacementId::from_uuid),
        )?;

        Ok(())
    }
}
