//! Business settings repository.
//!
//! A single row holds the letterhead details and the invoice number
//! sequence. Number allocation is a single UPDATE .. RETURNING so two
//! concurrent generations can never take the same number.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, Set,
    Statement,
};

use crate::entities::business_settings;

/// The singleton row ID.
const SETTINGS_ID: i16 = 1;

/// Error types for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings row has not been seeded.
    #[error("Business settings row is missing; run migrations")]
    Missing,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for updating business settings; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsInput {
    /// Trading name.
    pub business_name: Option<String>,
    /// Postal address.
    pub address: Option<Option<String>>,
    /// Contact phone.
    pub phone: Option<Option<String>>,
    /// Contact email.
    pub email: Option<Option<String>>,
    /// VAT registration number.
    pub vat_registration: Option<String>,
    /// Bank details for payment.
    pub bank_details: Option<Option<String>>,
    /// Default payment terms in days.
    pub default_payment_terms_days: Option<i16>,
    /// Invoice number prefix.
    pub invoice_prefix: Option<String>,
}

/// Business settings repository.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the settings row.
    ///
    /// # Errors
    ///
    /// Returns `Missing` if migrations have not seeded the singleton.
    pub async fn get(&self) -> Result<business_settings::Model, SettingsError> {
        business_settings::Entity::find_by_id(SETTINGS_ID)
            .one(&self.db)
            .await?
            .ok_or(SettingsError::Missing)
    }

    /// Updates the settings row.
    ///
    /// # Errors
    ///
    /// Returns `Missing` if migrations have not seeded the singleton.
    pub async fn update(
        &self,
        input: UpdateSettingsInput,
    ) -> Result<business_settings::Model, SettingsError> {
        let settings = self.get().await?;

        let mut active: business_settings::ActiveModel = settings.into();
        if let Some(business_name) = input.business_name {
            active.business_name = Set(business_name);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(vat_registration) = input.vat_registration {
            active.vat_registration = Set(vat_registration);
        }
        if let Some(bank_details) = input.bank_details {
            active.bank_details = Set(bank_details);
        }
        if let Some(terms) = input.default_payment_terms_days {
            active.default_payment_terms_days = Set(terms);
        }
        if let Some(invoice_prefix) = input.invoice_prefix {
            active.invoice_prefix = Set(invoice_prefix);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Atomically takes the next invoice number, e.g. "INV00042".
    ///
    /// Runs on the caller's connection so it participates in the invoice
    /// generation transaction.
    ///
    /// # Errors
    ///
    /// Returns `Missing` if migrations have not seeded the singleton.
    pub async fn allocate_invoice_number<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<String, SettingsError> {
        let row = conn
            .query_one(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r"UPDATE business_settings
                  SET next_invoice_number = next_invoice_number + 1
                  WHERE id = $1
                  RETURNING invoice_prefix, next_invoice_number - 1 AS allocated",
                [SETTINGS_ID.into()],
            ))
            .await?
            .ok_or(SettingsError::Missing)?;

        let prefix: String = row.try_get("", "invoice_prefix")?;
        let allocated: i32 = row.try_get("", "allocated")?;

        Ok(format!("{prefix}{allocated:05}"))
    }
}
