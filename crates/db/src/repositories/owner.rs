//! Owner repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use paddock_shared::types::PageRequest;

use crate::entities::owners;

/// Error types for owner operations.
#[derive(Debug, thiserror::Error)]
pub enum OwnerError {
    /// Owner not found.
    #[error("Owner not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an owner.
#[derive(Debug, Clone)]
pub struct CreateOwnerInput {
    /// Display name.
    pub name: String,
    /// Contact email, if known.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Account code for external accounting systems.
    pub account_code: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input for updating an owner; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOwnerInput {
    /// New display name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<Option<String>>,
    /// New contact phone.
    pub phone: Option<Option<String>>,
    /// New postal address.
    pub address: Option<Option<String>>,
    /// New account code.
    pub account_code: Option<Option<String>>,
    /// New notes.
    pub notes: Option<Option<String>>,
}

/// Owner repository.
#[derive(Debug, Clone)]
pub struct OwnerRepository {
    db: DatabaseConnection,
}

impl OwnerRepository {
    /// Creates a new owner repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(&self, input: CreateOwnerInput) -> Result<owners::Model, OwnerError> {
        let now = chrono::Utc::now().into();
        let owner = owners::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            account_code: Set(input.account_code),
            notes: Set(input.notes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(owner.insert(&self.db).await?)
    }

    /// Finds an owner by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<owners::Model>, OwnerError> {
        Ok(owners::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Lists active owners ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<owners::Model>, u64), OwnerError> {
        let query = owners::Entity::find()
            .filter(owners::Column::IsActive.eq(true))
            .order_by_asc(owners::Column::Name);

        let total = query.clone().count(&self.db).await?;
        let items = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((items, total))
    }

    /// Updates an owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the owner does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateOwnerInput,
    ) -> Result<owners::Model, OwnerError> {
        let owner = owners::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OwnerError::NotFound(id))?;

        let mut active: owners::ActiveModel = owner.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(account_code) = input.account_code {
            active.account_code = Set(account_code);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes an owner by clearing the active flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the owner does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<owners::Model, OwnerError> {
        let owner = owners::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OwnerError::NotFound(id))?;

        let mut active: owners::ActiveModel = owner.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }
}
