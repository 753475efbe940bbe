//! Horse repository for database operations.
//!
//! "Current placement" and "current owner" are derived queries over the
//! placement and ownership ledgers, never stored state.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use paddock_shared::types::PageRequest;

use crate::entities::{horses, owners, ownerships, placements, sea_orm_active_enums::HorseSex};

/// Error types for horse operations.
#[derive(Debug, thiserror::Error)]
pub enum HorseError {
    /// Horse not found.
    #[error("Horse not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a horse.
#[derive(Debug, Clone)]
pub struct CreateHorseInput {
    /// Horse name.
    pub name: String,
    /// Date of birth, if known.
    pub date_of_birth: Option<NaiveDate>,
    /// Age in years when the date of birth is unknown.
    pub age_years: Option<i16>,
    /// Coat color.
    pub color: Option<String>,
    /// Sex.
    pub sex: Option<HorseSex>,
    /// Sire/dam information.
    pub breeding_notes: Option<String>,
    /// Sire name.
    pub sire_name: Option<String>,
    /// Passport number.
    pub passport_number: Option<String>,
    /// Whether the horse has a passport.
    pub has_passport: bool,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input for updating a horse; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateHorseInput {
    /// New name.
    pub name: Option<String>,
    /// New coat color.
    pub color: Option<Option<String>>,
    /// New notes.
    pub notes: Option<Option<String>>,
    /// New passport number.
    pub passport_number: Option<Option<String>>,
}

/// Horse repository.
#[derive(Debug, Clone)]
pub struct HorseRepository {
    db: DatabaseConnection,
}

impl HorseRepository {
    /// Creates a new horse repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a horse.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateHorseInput) -> Result<horses::Model, HorseError> {
        let now = chrono::Utc::now().into();
        let horse = horses::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            date_of_birth: Set(input.date_of_birth),
            age_years: Set(input.age_years),
            color: Set(input.color),
            sex: Set(input.sex),
            breeding_notes: Set(input.breeding_notes),
            sire_name: Set(input.sire_name),
            passport_number: Set(input.passport_number),
            has_passport: Set(input.has_passport),
            notes: Set(input.notes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(horse.insert(&self.db).await?)
    }

    /// Finds a horse by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<horses::Model>, HorseError> {
        Ok(horses::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists active horses ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<horses::Model>, u64), HorseError> {
        let query = horses::Entity::find()
            .filter(horses::Column::IsActive.eq(true))
            .order_by_asc(horses::Column::Name);

        let total = query.clone().count(&self.db).await?;
        let items = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Updates a horse.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the horse does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateHorseInput,
    ) -> Result<horses::Model, HorseError> {
        let horse = horses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(HorseError::NotFound(id))?;

        let mut active: horses::ActiveModel = horse.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(color) = input.color {
            active.color = Set(color);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(passport_number) = input.passport_number {
            active.passport_number = Set(passport_number);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Marks a horse as permanently departed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the horse does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<horses::Model, HorseError> {
        let horse = horses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(HorseError::NotFound(id))?;

        let mut active: horses::ActiveModel = horse.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// The horse's open placement, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn current_placement(
        &self,
        horse_id: Uuid,
    ) -> Result<Option<placements::Model>, HorseError> {
        Ok(placements::Entity::find()
            .filter(placements::Column::HorseId.eq(horse_id))
            .filter(placements::Column::EndDate.is_null())
            .one(&self.db)
            .await?)
    }

    /// The horse's owner on a given date, from the ownership ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn owner_on(
        &self,
        horse_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<owners::Model>, HorseError> {
        let window = ownerships::Entity::find()
            .filter(ownerships::Column::HorseId.eq(horse_id))
            .filter(ownerships::Column::StartDate.lte(date))
            .filter(
                ownerships::Column::EndDate
                    .is_null()
                    .or(ownerships::Column::EndDate.gt(date)),
            )
            .one(&self.db)
            .await?;

        let Some(window) = window else {
            return Ok(None);
        };

        Ok(owners::Entity::find_by_id(window.owner_id)
            .one(&self.db)
            .await?)
    }
}
