//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the yard schema
//! - Repository abstractions enforcing the persistence invariants
//!   (overlap rejection at creation, one invoice per owner/period,
//!   all-or-nothing invoice generation)
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    ExtraChargeRepository, HealthRepository, HorseRepository, InvoiceRepository,
    LocationRepository, OwnerRepository, OwnershipRepository, PlacementRepository,
    RateTypeRepository, SettingsRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
