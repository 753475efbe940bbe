//! Service provider repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::ProviderType, service_providers};

/// Error types for service provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceProviderError {
    /// Provider not found.
    #[error("Service provider not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a service provider.
#[derive(Debug, Clone)]
pub struct CreateServiceProviderInput {
    /// Display name.
    pub name: String,
    /// Provider category.
    pub provider_type: ProviderType,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Service provider repository.
#[derive(Debug, Clone)]
pub struct ServiceProviderRepository {
    db: DatabaseConnection,
}

impl ServiceProviderRepository {
    /// Creates a new service provider repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a service provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateServiceProviderInput,
    ) -> Result<service_providers::Model, ServiceProviderError> {
        let now = chrono::Utc::now().into();
        let provider = service_providers::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            provider_type: Set(input.provider_type),
            phone: Set(input.phone),
            email: Set(input.email),
            address: Set(input.address),
            notes: Set(input.notes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(provider.insert(&self.db).await?)
    }

    /// Finds a provider by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<service_providers::Model>, ServiceProviderError> {
        Ok(service_providers::Entity::find_by_id(id)
            .one(&self.db)
            .await?)
    }

    /// Lists active providers grouped by category, then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<service_providers::Model>, ServiceProviderError> {
        Ok(service_providers::Entity::find()
            .filter(service_providers::Column::IsActive.eq(true))
            .order_by_asc(service_providers::Column::ProviderType)
            .order_by_asc(service_providers::Column::Name)
            .all(&self.db)
            .await?)
    }
}
