//! Invoice repository: generation, lifecycle, overdue sweep, export.
//!
//! Generation is all-or-nothing: the invoice row, its line items, the
//! invoice number allocation and the extra-charge marking all commit in
//! one transaction or not at all. Duplicate billing for an owner/period is
//! rejected with a distinct conflict error before anything is written, and
//! a partial unique index backs the check up under concurrency.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use paddock_core::billing::{
    BillingPeriod, BuiltInvoice, ExtraChargeInput, InvoiceBuilder, InvoiceDocument, InvoiceError,
    InvoiceStatus as CoreStatus, Letterhead, LineItem, PlacementSegment, validate_can_delete,
    validate_status_transition,
};
use paddock_core::yard::{OwnershipWindow, clip_to_window};
use paddock_shared::types::{
    ExtraChargeId, HorseId, InvoiceId, OwnerId, PlacementId, RateTypeId,
};

use crate::entities::{
    extra_charges, horses, invoice_line_items, invoices, owners, ownerships, placements,
};
use crate::repositories::rate_type::RateTypeRepository;
use crate::repositories::settings::{SettingsError, SettingsRepository};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceRepoError {
    /// The billed owner does not exist.
    #[error("Owner not found: {0}")]
    OwnerNotFound(Uuid),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    /// Settings singleton missing (migrations not run).
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Domain validation, conflict, or lifecycle error.
    #[error(transparent)]
    Domain(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for generating an invoice.
#[derive(Debug, Clone)]
pub struct GenerateInvoiceInput {
    /// The owner to bill.
    pub owner_id: Uuid,
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (exclusive).
    pub period_end: NaiveDate,
    /// Free-text notes for the invoice.
    pub notes: Option<String>,
}

/// An invoice with its ordered line items.
#[derive(Debug, Clone)]
pub struct InvoiceWithLines {
    /// The invoice row.
    pub invoice: invoices::Model,
    /// Line items ordered by line number.
    pub line_items: Vec<invoice_line_items::Model>,
}

/// A freshly overdue invoice paired with its owner, for the reminder email.
#[derive(Debug, Clone)]
pub struct OverdueInvoice {
    /// The invoice, now in overdue status.
    pub invoice: invoices::Model,
    /// The owner to remind.
    pub owner: owners::Model,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Calculates the invoice for an owner/period without persisting
    /// anything. Duplicate checks are skipped — this is a what-if.
    ///
    /// # Errors
    ///
    /// Returns domain errors from the builder (nothing to bill, missing
    /// rate, overlapping placements).
    pub async fn preview(
        &self,
        input: &GenerateInvoiceInput,
    ) -> Result<BuiltInvoice, InvoiceRepoError> {
        let period = Self::period_of(input)?;
        self.require_owner(input.owner_id).await?;
        self.calculate(input.owner_id, period).await
    }

    /// Generates and persists a draft invoice for an owner/period.
    ///
    /// # Errors
    ///
    /// - `Domain(DuplicateInvoice)` if any invoice for the owner overlaps
    ///   the period — "already billed" is distinct from bad input
    /// - `Domain(NothingToBill | MissingRate | ...)` from the builder
    /// - `OwnerNotFound` for an unknown owner
    pub async fn generate(
        &self,
        input: GenerateInvoiceInput,
    ) -> Result<InvoiceWithLines, InvoiceRepoError> {
        let period = Self::period_of(&input)?;
        self.require_owner(input.owner_id).await?;
        self.reject_duplicate(input.owner_id, period).await?;

        let built = self.calculate(input.owner_id, period).await?;

        let settings = SettingsRepository::new(self.db.clone()).get().await?;
        let payment_terms_days = settings.default_payment_terms_days;
        let due_date = period.due_date(u16::try_from(payment_terms_days).unwrap_or(30));

        let txn = self.db.begin().await?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let invoice_number = SettingsRepository::allocate_invoice_number(&txn).await?;

        let invoice = invoices::ActiveModel {
            id: Set(Uuid::now_v7()),
            owner_id: Set(input.owner_id),
            invoice_number: Set(invoice_number),
            period_start: Set(period.start),
            period_end: Set(period.end),
            status: Set(crate::entities::sea_orm_active_enums::InvoiceStatus::Draft),
            subtotal: Set(built.subtotal),
            total: Set(built.total),
            payment_terms_days: Set(payment_terms_days),
            due_date: Set(due_date),
            notes: Set(input.notes),
            reminder_sent_on: Set(None),
            sent_at: Set(None),
            paid_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut line_models = Vec::with_capacity(built.line_items.len());
        for (index, line) in built.line_items.iter().enumerate() {
            let line_no = i32::try_from(index).unwrap_or(i32::MAX) + 1;
            let model = invoice_line_items::ActiveModel {
                id: Set(Uuid::now_v7()),
                invoice_id: Set(invoice.id),
                line_no: Set(line_no),
                horse_id: Set(line.horse_id.map(HorseId::into_inner)),
                placement_id: Set(line.placement_id.map(PlacementId::into_inner)),
                extra_charge_id: Set(line.charge_id.map(ExtraChargeId::into_inner)),
                line_type: Set(line.line_type.into()),
                description: Set(line.description.clone()),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(line.line_total),
            }
            .insert(&txn)
            .await?;
            line_models.push(model);

            // Consume the extra charge so it is never billed twice.
            if let Some(charge_id) = line.charge_id {
                let mut charge: extra_charges::ActiveModel =
                    extra_charges::Entity::find_by_id(charge_id.into_inner())
                        .one(&txn)
                        .await?
                        .ok_or_else(|| DbErr::RecordNotFound(charge_id.to_string()))?
                        .into();
                charge.invoiced = Set(true);
                charge.invoice_id = Set(Some(invoice.id));
                charge.updated_at = Set(now);
                charge.update(&txn).await?;
            }
        }

        txn.commit().await?;

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            owner_id = %invoice.owner_id,
            total = %invoice.total,
            "Invoice generated"
        );

        Ok(InvoiceWithLines {
            invoice,
            line_items: line_models,
        })
    }

    /// Finds an invoice with its line items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the invoice does not exist.
    pub async fn find_with_lines(&self, id: Uuid) -> Result<InvoiceWithLines, InvoiceRepoError> {
        let invoice = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceRepoError::NotFound(id))?;

        let line_items = invoice_line_items::Entity::find()
            .filter(invoice_line_items::Column::InvoiceId.eq(id))
            .order_by_asc(invoice_line_items::Column::LineNo)
            .all(&self.db)
            .await?;

        Ok(InvoiceWithLines {
            invoice,
            line_items,
        })
    }

    /// Lists invoices, newest first, optionally for one owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        owner_id: Option<Uuid>,
    ) -> Result<Vec<invoices::Model>, InvoiceRepoError> {
        let mut query = invoices::Entity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(invoices::Column::OwnerId.eq(owner_id));
        }
        Ok(query
            .order_by_desc(invoices::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Marks a draft invoice as sent, freezing its line items.
    ///
    /// # Errors
    ///
    /// Returns `Domain(InvalidStatusTransition)` unless the invoice is a
    /// draft.
    pub async fn send(&self, id: Uuid) -> Result<invoices::Model, InvoiceRepoError> {
        self.transition(id, CoreStatus::Sent).await
    }

    /// Records payment on a sent or overdue invoice.
    ///
    /// # Errors
    ///
    /// Returns `Domain(InvalidStatusTransition)` for drafts (sending may
    /// not be skipped) or already-paid invoices.
    pub async fn mark_paid(&self, id: Uuid) -> Result<invoices::Model, InvoiceRepoError> {
        self.transition(id, CoreStatus::Paid).await
    }

    /// Deletes a draft invoice and releases its extra charges for future
    /// billing. Non-drafts are immutable.
    ///
    /// # Errors
    ///
    /// Returns `Domain(CanOnlyDeleteDraft)` for non-draft invoices.
    pub async fn delete_draft(&self, id: Uuid) -> Result<(), InvoiceRepoError> {
        let invoice = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceRepoError::NotFound(id))?;

        validate_can_delete(invoice.status.into())?;

        let txn = self.db.begin().await?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let billed_charges = extra_charges::Entity::find()
            .filter(extra_charges::Column::InvoiceId.eq(id))
            .all(&txn)
            .await?;
        for charge in billed_charges {
            let mut active: extra_charges::ActiveModel = charge.into();
            active.invoiced = Set(false);
            active.invoice_id = Set(None);
            active.updated_at = Set(now);
            active.update(&txn).await?;
        }

        invoice_line_items::Entity::delete_many()
            .filter(invoice_line_items::Column::InvoiceId.eq(id))
            .exec(&txn)
            .await?;
        invoices::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// The daily overdue sweep: every sent invoice past its due date is
    /// transitioned to overdue. Returns the affected invoices with their
    /// owners so the scheduler can send reminders.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn sweep_overdue(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<OverdueInvoice>, InvoiceRepoError> {
        let due = invoices::Entity::find()
            .filter(
                invoices::Column::Status
                    .eq(crate::entities::sea_orm_active_enums::InvoiceStatus::Sent),
            )
            .filter(invoices::Column::DueDate.lt(today))
            .all(&self.db)
            .await?;

        let mut swept = Vec::with_capacity(due.len());
        for invoice in due {
            let updated = self.transition(invoice.id, CoreStatus::Overdue).await?;
            let owner = owners::Entity::find_by_id(updated.owner_id)
                .one(&self.db)
                .await?
                .ok_or(InvoiceRepoError::OwnerNotFound(updated.owner_id))?;
            swept.push(OverdueInvoice {
                invoice: updated,
                owner,
            });
        }

        Ok(swept)
    }

    /// Records that an overdue reminder went out today. Only called after
    /// a confirmed send, so a failed delivery retries tomorrow.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the invoice does not exist.
    pub async fn mark_reminder_sent(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<(), InvoiceRepoError> {
        let invoice = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceRepoError::NotFound(id))?;

        let mut active: invoices::ActiveModel = invoice.into();
        active.reminder_sent_on = Set(Some(today));
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Assembles the export document for render collaborators: letterhead,
    /// owner, period, ordered line items, totals.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the invoice does not exist.
    pub async fn document(&self, id: Uuid) -> Result<InvoiceDocument, InvoiceRepoError> {
        let with_lines = self.find_with_lines(id).await?;
        let invoice = with_lines.invoice;

        let owner = owners::Entity::find_by_id(invoice.owner_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceRepoError::OwnerNotFound(invoice.owner_id))?;

        let settings = SettingsRepository::new(self.db.clone()).get().await?;

        let period = BillingPeriod::new(invoice.period_start, invoice.period_end).ok_or(
            InvoiceError::EmptyPeriod {
                start: invoice.period_start,
                end: invoice.period_end,
            },
        )?;

        let line_items = with_lines
            .line_items
            .into_iter()
            .map(|row| LineItem {
                horse_id: row.horse_id.map(HorseId::from_uuid),
                placement_id: row.placement_id.map(PlacementId::from_uuid),
                charge_id: row.extra_charge_id.map(ExtraChargeId::from_uuid),
                line_type: row.line_type.into(),
                description: row.description,
                quantity: row.quantity,
                unit_price: row.unit_price,
                line_total: row.line_total,
            })
            .collect();

        Ok(InvoiceDocument {
            invoice_id: InvoiceId::from_uuid(invoice.id),
            invoice_number: invoice.invoice_number,
            status: invoice.status.into(),
            owner_id: OwnerId::from_uuid(owner.id),
            owner_name: owner.name,
            owner_address: owner.address.unwrap_or_default(),
            period,
            due_date: invoice.due_date,
            line_items,
            subtotal: invoice.subtotal,
            total: invoice.total,
            notes: invoice.notes.unwrap_or_default(),
            letterhead: Letterhead {
                business_name: settings.business_name,
                address: settings.address.unwrap_or_default(),
                phone: settings.phone.unwrap_or_default(),
                email: settings.email.unwrap_or_default(),
                vat_registration: settings.vat_registration,
                bank_details: settings.bank_details.unwrap_or_default(),
            },
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn period_of(input: &GenerateInvoiceInput) -> Result<BillingPeriod, InvoiceRepoError> {
        BillingPeriod::new(input.period_start, input.period_end).ok_or_else(|| {
            InvoiceError::EmptyPeriod {
                start: input.period_start,
                end: input.period_end,
            }
            .into()
        })
    }

    async fn require_owner(&self, owner_id: Uuid) -> Result<owners::Model, InvoiceRepoError> {
        owners::Entity::find_by_id(owner_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceRepoError::OwnerNotFound(owner_id))
    }

    /// Rejects generation when any invoice for the owner overlaps the
    /// period. Half-open ranges overlap when each starts before the other
    /// ends.
    async fn reject_duplicate(
        &self,
        owner_id: Uuid,
        period: BillingPeriod,
    ) -> Result<(), InvoiceRepoError> {
        let existing = invoices::Entity::find()
            .filter(invoices::Column::OwnerId.eq(owner_id))
            .filter(invoices::Column::PeriodStart.lt(period.end))
            .filter(invoices::Column::PeriodEnd.gt(period.start))
            .one(&self.db)
            .await?;

        if let Some(existing) = existing {
            return Err(InvoiceError::DuplicateInvoice {
                owner_id: OwnerId::from_uuid(owner_id),
                invoice_number: existing.invoice_number,
            }
            .into());
        }
        Ok(())
    }

    /// Gathers the owner's billable segments and charges, then runs the
    /// pure builder against the rate catalog.
    async fn calculate(
        &self,
        owner_id: Uuid,
        period: BillingPeriod,
    ) -> Result<BuiltInvoice, InvoiceRepoError> {
        // Ownership windows touching the period.
        let windows = ownerships::Entity::find()
            .filter(ownerships::Column::OwnerId.eq(owner_id))
            .filter(ownerships::Column::StartDate.lt(period.end))
            .filter(
                ownerships::Column::EndDate
                    .is_null()
                    .or(ownerships::Column::EndDate.gt(period.start)),
            )
            .all(&self.db)
            .await?;

        // Horse names for descriptions and ordering.
        let horse_ids: Vec<Uuid> = windows.iter().map(|w| w.horse_id).collect();
        let horse_names: HashMap<Uuid, String> = horses::Entity::find()
            .filter(horses::Column::Id.is_in(horse_ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|h| (h.id, h.name))
            .collect();

        // Placements clipped to each ownership window.
        let mut segments: Vec<PlacementSegment> = Vec::new();
        for window in &windows {
            let horse_placements = placements::Entity::find()
                .filter(placements::Column::HorseId.eq(window.horse_id))
                .filter(placements::Column::StartDate.lt(period.end))
                .filter(
                    placements::Column::EndDate
                        .is_null()
                        .or(placements::Column::EndDate.gt(period.start)),
                )
                .all(&self.db)
                .await?;

            let ownership = OwnershipWindow {
                horse_id: HorseId::from_uuid(window.horse_id),
                owner_id: OwnerId::from_uuid(window.owner_id),
                start: window.start_date,
                end: window.end_date,
            };

            for placement in horse_placements {
                let Some((start, end)) =
                    clip_to_window(placement.start_date, placement.end_date, &ownership)
                else {
                    continue;
                };

                segments.push(PlacementSegment {
                    placement_id: PlacementId::from_uuid(placement.id),
                    horse_id: HorseId::from_uuid(placement.horse_id),
                    horse_name: horse_names
                        .get(&placement.horse_id)
                        .cloned()
                        .unwrap_or_default(),
                    rate_type_id: RateTypeId::from_uuid(placement.rate_type_id),
                    start,
                    end,
                });
            }
        }

        // Unbilled extra charges dated within the period.
        let charges = crate::repositories::extra_charge::ExtraChargeRepository::unbilled_in_period(
            &self.db,
            owner_id,
            period.start,
            period.end,
        )
        .await?;

        let charge_horse_ids: Vec<Uuid> = charges.iter().map(|c| c.horse_id).collect();
        let charge_horse_names: HashMap<Uuid, String> = horses::Entity::find()
            .filter(horses::Column::Id.is_in(charge_horse_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|h| (h.id, h.name))
            .collect();

        let extras: Vec<ExtraChargeInput> = charges
            .into_iter()
            .map(|charge| ExtraChargeInput {
                charge_id: ExtraChargeId::from_uuid(charge.id),
                horse_id: HorseId::from_uuid(charge.horse_id),
                horse_name: charge_horse_names
                    .get(&charge.horse_id)
                    .cloned()
                    .unwrap_or_default(),
                line_type: charge.charge_type.into(),
                date: charge.date,
                description: charge.description,
                amount: charge.amount,
            })
            .collect();

        let catalog = RateTypeRepository::load_catalog(&self.db).await?;
        let built = InvoiceBuilder::build(
            OwnerId::from_uuid(owner_id),
            period,
            &segments,
            &extras,
            |rate_type_id| catalog.get(&rate_type_id.into_inner()).cloned(),
        )?;

        Ok(built)
    }

    /// Applies a lifecycle transition after the core table approves it.
    async fn transition(
        &self,
        id: Uuid,
        to: CoreStatus,
    ) -> Result<invoices::Model, InvoiceRepoError> {
        let invoice = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceRepoError::NotFound(id))?;

        let from: CoreStatus = invoice.status.into();
        validate_status_transition(from, to)?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let mut active: invoices::ActiveModel = invoice.into();
        active.status = Set(to.into());
        active.updated_at = Set(now);
        match to {
            CoreStatus::Sent => active.sent_at = Set(Some(now)),
            CoreStatus::Paid => active.paid_at = Set(Some(now)),
            CoreStatus::Draft | CoreStatus::Overdue => {}
        }

        let updated = active.update(&self.db).await?;
        info!(invoice_id = %updated.id, status = ?updated.status, "Invoice status changed");
        Ok(updated)
    }
}
