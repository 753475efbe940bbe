//! Health record repository: vaccinations, farrier visits, and the
//! read-then-notify queries behind the daily reminder jobs.
//!
//! The jobs are idempotent per day: each record carries the date its last
//! reminder went out, and the guard is only advanced after a confirmed
//! send.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use paddock_core::health::{
    default_farrier_due, farrier_due_within, next_due_from_interval, should_send_reminder,
    vaccination_reminder_open,
};

use crate::entities::{
    farrier_visits, horses, owners, ownerships, sea_orm_active_enums::FarrierWork,
    vaccination_types, vaccinations,
};

/// Error types for health record operations.
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    /// Record not found.
    #[error("Health record not found: {0}")]
    NotFound(Uuid),

    /// Vaccination type not found.
    #[error("Vaccination type not found: {0}")]
    TypeNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording a vaccination.
#[derive(Debug, Clone)]
pub struct CreateVaccinationInput {
    /// The horse.
    pub horse_id: Uuid,
    /// The vaccination type.
    pub vaccination_type_id: Uuid,
    /// Date the vaccination was given.
    pub date_given: NaiveDate,
    /// Explicit next due date; defaulted from the type's interval if absent.
    pub next_due_date: Option<NaiveDate>,
    /// Vet who administered it.
    pub vet_name: Option<String>,
    /// Vaccine batch number.
    pub batch_number: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input for recording a farrier visit.
#[derive(Debug, Clone)]
pub struct CreateFarrierVisitInput {
    /// The horse.
    pub horse_id: Uuid,
    /// Provider that did the work.
    pub service_provider_id: Option<Uuid>,
    /// Visit date.
    pub date: NaiveDate,
    /// Work performed.
    pub work_done: FarrierWork,
    /// Explicit next due date; defaulted to six weeks out if absent.
    pub next_due_date: Option<NaiveDate>,
    /// Cost of the visit.
    pub cost: Decimal,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A vaccination due for a reminder, with the contact details to notify.
#[derive(Debug, Clone)]
pub struct VaccinationReminder {
    /// The vaccination record.
    pub vaccination: vaccinations::Model,
    /// The vaccination type name.
    pub vaccination_name: String,
    /// The horse name.
    pub horse_name: String,
    /// Current owner's name.
    pub owner_name: String,
    /// Current owner's email, when available.
    pub owner_email: Option<String>,
}

/// A farrier visit due for a reminder, with the contact details to notify.
#[derive(Debug, Clone)]
pub struct FarrierReminder {
    /// The most recent farrier visit for the horse.
    pub visit: farrier_visits::Model,
    /// The horse name.
    pub horse_name: String,
    /// Current owner's name.
    pub owner_name: String,
    /// Current owner's email, when available.
    pub owner_email: Option<String>,
}

/// Health record repository.
#[derive(Debug, Clone)]
pub struct HealthRepository {
    db: DatabaseConnection,
}

impl HealthRepository {
    /// Creates a new health repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a vaccination, defaulting the next due date from the
    /// type's interval.
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` for an unknown vaccination type.
    pub async fn record_vaccination(
        &self,
        input: CreateVaccinationInput,
    ) -> Result<vaccinations::Model, HealthError> {
        let vaccination_type = vaccination_types::Entity::find_by_id(input.vaccination_type_id)
            .one(&self.db)
            .await?
            .ok_or(HealthError::TypeNotFound(input.vaccination_type_id))?;

        let next_due = input.next_due_date.unwrap_or_else(|| {
            next_due_from_interval(
                input.date_given,
                u32::try_from(vaccination_type.interval_months).unwrap_or(12),
            )
        });

        let now = chrono::Utc::now().into();
        let vaccination = vaccinations::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(input.horse_id),
            vaccination_type_id: Set(input.vaccination_type_id),
            date_given: Set(input.date_given),
            next_due_date: Set(next_due),
            vet_name: Set(input.vet_name),
            batch_number: Set(input.batch_number),
            notes: Set(input.notes),
            reminder_sent_on: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(vaccination.insert(&self.db).await?)
    }

    /// Records a farrier visit, defaulting the next due date to six weeks
    /// after the visit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn record_farrier_visit(
        &self,
        input: CreateFarrierVisitInput,
    ) -> Result<farrier_visits::Model, HealthError> {
        let next_due = input
            .next_due_date
            .unwrap_or_else(|| default_farrier_due(input.date));

        let now = chrono::Utc::now().into();
        let visit = farrier_visits::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(input.horse_id),
            service_provider_id: Set(input.service_provider_id),
            date: Set(input.date),
            work_done: Set(input.work_done),
            next_due_date: Set(next_due),
            cost: Set(input.cost),
            extra_charge_id: Set(None),
            notes: Set(input.notes),
            reminder_sent_on: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(visit.insert(&self.db).await?)
    }

    /// Lists the active vaccination types.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_vaccination_types(
        &self,
    ) -> Result<Vec<vaccination_types::Model>, HealthError> {
        Ok(vaccination_types::Entity::find()
            .filter(vaccination_types::Column::IsActive.eq(true))
            .order_by_asc(vaccination_types::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Vaccination history for a horse, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn vaccinations_for_horse(
        &self,
        horse_id: Uuid,
    ) -> Result<Vec<vaccinations::Model>, HealthError> {
        Ok(vaccinations::Entity::find()
            .filter(vaccinations::Column::HorseId.eq(horse_id))
            .order_by_desc(vaccinations::Column::DateGiven)
            .all(&self.db)
            .await?)
    }

    /// Farrier history for a horse, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn farrier_visits_for_horse(
        &self,
        horse_id: Uuid,
    ) -> Result<Vec<farrier_visits::Model>, HealthError> {
        Ok(farrier_visits::Entity::find()
            .filter(farrier_visits::Column::HorseId.eq(horse_id))
            .order_by_desc(farrier_visits::Column::Date)
            .all(&self.db)
            .await?)
    }

    /// Vaccinations on active horses whose reminder window is open and
    /// whose guard allows a send today.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn vaccinations_due_for_reminder(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<VaccinationReminder>, HealthError> {
        let rows = vaccinations::Entity::find()
            .find_also_related(vaccination_types::Entity)
            .all(&self.db)
            .await?;

        let mut reminders = Vec::new();
        for (vaccination, vaccination_type) in rows {
            let Some(vaccination_type) = vaccination_type else {
                continue;
            };

            let window_open = vaccination_reminder_open(
                today,
                vaccination.next_due_date,
                u16::try_from(vaccination_type.reminder_days_before).unwrap_or(30),
            );
            if !window_open || !should_send_reminder(today, vaccination.reminder_sent_on) {
                continue;
            }

            let Some((horse_name, owner)) =
                self.horse_and_owner(vaccination.horse_id, today).await?
            else {
                continue;
            };

            reminders.push(VaccinationReminder {
                vaccination,
                vaccination_name: vaccination_type.name,
                horse_name,
                owner_name: owner.name,
                owner_email: owner.email,
            });
        }

        Ok(reminders)
    }

    /// The most recent farrier visit per active horse, where the next due
    /// date falls within the lookahead window and the guard allows a send.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn farrier_visits_due_for_reminder(
        &self,
        today: NaiveDate,
        lookahead_days: u16,
    ) -> Result<Vec<FarrierReminder>, HealthError> {
        let rows = farrier_visits::Entity::find()
            .order_by_desc(farrier_visits::Column::Date)
            .all(&self.db)
            .await?;

        let mut reminders = Vec::new();
        let mut seen_horses = std::collections::HashSet::new();
        for visit in rows {
            // Most recent visit per horse only.
            if !seen_horses.insert(visit.horse_id) {
                continue;
            }

            if !farrier_due_within(today, visit.next_due_date, lookahead_days)
                || !should_send_reminder(today, visit.reminder_sent_on)
            {
                continue;
            }

            let Some((horse_name, owner)) = self.horse_and_owner(visit.horse_id, today).await?
            else {
                continue;
            };

            reminders.push(FarrierReminder {
                visit,
                horse_name,
                owner_name: owner.name,
                owner_email: owner.email,
            });
        }

        Ok(reminders)
    }

    /// Records that a vaccination reminder went out today.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the vaccination does not exist.
    pub async fn mark_vaccination_reminded(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<(), HealthError> {
        let vaccination = vaccinations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(HealthError::NotFound(id))?;

        let mut active: vaccinations::ActiveModel = vaccination.into();
        active.reminder_sent_on = Set(Some(today));
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Records that a farrier reminder went out today.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the visit does not exist.
    pub async fn mark_farrier_reminded(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<(), HealthError> {
        let visit = farrier_visits::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(HealthError::NotFound(id))?;

        let mut active: farrier_visits::ActiveModel = visit.into();
        active.reminder_sent_on = Set(Some(today));
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Resolves an active horse's name and its owner on `date`; `None` if
    /// the horse is inactive or currently unowned.
    async fn horse_and_owner(
        &self,
        horse_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<(String, owners::Model)>, HealthError> {
        let horse = horses::Entity::find_by_id(horse_id).one(&self.db).await?;
        let Some(horse) = horse else {
            return Ok(None);
        };
        if !horse.is_active {
            return Ok(None);
        }

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

        let owner = owners::Entity::find_by_id(window.owner_id)
            .one(&self.db)
            .await?;

        Ok(owner.map(|owner| (horse.name, owner)))
    }
}
