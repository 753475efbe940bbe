//! Location repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{locations, placements};

/// Error types for location operations.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// Location not found.
    #[error("Location not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a location.
#[derive(Debug, Clone)]
pub struct CreateLocationInput {
    /// Field or stable name.
    pub name: String,
    /// Main site name.
    pub site: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Maximum number of horses, if capped.
    pub capacity: Option<i32>,
}

/// Location repository.
#[derive(Debug, Clone)]
pub struct LocationRepository {
    db: DatabaseConnection,
}

impl LocationRepository {
    /// Creates a new location repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateLocationInput,
    ) -> Result<locations::Model, LocationError> {
        let now = chrono::Utc::now().into();
        let location = locations::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            site: Set(input.site),
            description: Set(input.description),
            capacity: Set(input.capacity),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(location.insert(&self.db).await?)
    }

    /// Finds a location by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<locations::Model>, LocationError> {
        Ok(locations::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists active locations ordered by site, then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<locations::Model>, LocationError> {
        Ok(locations::Entity::find()
            .filter(locations::Column::IsActive.eq(true))
            .order_by_asc(locations::Column::Site)
            .order_by_asc(locations::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Counts horses currently placed at a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn current_horse_count(&self, id: Uuid) -> Result<u64, LocationError> {
        Ok(placements::Entity::find()
            .filter(placements::Column::LocationId.eq(id))
            .filter(placements::Column::EndDate.is_null())
            .count(&self.db)
            .await?)
    }
}
