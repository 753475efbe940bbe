//! The daily read-then-notify jobs.
//!
//! Each job queries for records whose computed due date falls inside its
//! window and whose per-day guard allows a send, hands the message to the
//! email service, and advances the guard only when the send succeeded.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use paddock_db::repositories::{HealthRepository, InvoiceRepository};
use paddock_shared::EmailService;
use paddock_shared::types::money::format_gbp;

/// Sends reminders for vaccinations whose reminder window has opened.
/// Returns the number of reminders sent.
pub async fn vaccination_reminders(
    db: &DatabaseConnection,
    email: &EmailService,
    today: NaiveDate,
) -> anyhow::Result<u32> {
    let repo = HealthRepository::new(db.clone());
    let due = repo.vaccinations_due_for_reminder(today).await?;

    let mut sent = 0;
    for reminder in due {
        let Some(owner_email) = reminder.owner_email.as_deref() else {
            continue;
        };

        let outcome = email
            .send_vaccination_reminder(
                owner_email,
                &reminder.owner_name,
                &reminder.horse_name,
                &reminder.vaccination_name,
                reminder.vaccination.next_due_date,
            )
            .await;

        match outcome {
            Ok(()) => {
                // Guard only advances on confirmed delivery.
                repo.mark_vaccination_reminded(reminder.vaccination.id, today)
                    .await?;
                sent += 1;
            }
            Err(e) => {
                warn!(
                    vaccination_id = %reminder.vaccination.id,
                    error = %e,
                    "Vaccination reminder failed; will retry on next run"
                );
            }
        }
    }

    info!(sent, "Vaccination reminder job finished");
    Ok(sent)
}

/// Sends reminders for farrier visits due within the lookahead window.
/// Returns the number of reminders sent.
pub async fn farrier_reminders(
    db: &DatabaseConnection,
    email: &EmailService,
    today: NaiveDate,
    lookahead_days: u16,
) -> anyhow::Result<u32> {
    let repo = HealthRepository::new(db.clone());
    let due = repo
        .farrier_visits_due_for_reminder(today, lookahead_days)
        .await?;

    let mut sent = 0;
    for reminder in due {
        let Some(owner_email) = reminder.owner_email.as_deref() else {
            continue;
        };

        let outcome = email
            .send_farrier_reminder(
                owner_email,
                &reminder.owner_name,
                &reminder.horse_name,
                reminder.visit.next_due_date,
            )
            .await;

        match outcome {
            Ok(()) => {
                repo.mark_farrier_reminded(reminder.visit.id, today).await?;
                sent += 1;
            }
            Err(e) => {
                warn!(
                    visit_id = %reminder.visit.id,
                    error = %e,
                    "Farrier reminder failed; will retry on next run"
                );
            }
        }
    }

    info!(sent, "Farrier reminder job finished");
    Ok(sent)
}

/// Transitions sent invoices past their due date to overdue and emails the
/// owner once at the transition. Returns the number of reminders sent.
pub async fn invoice_overdue_sweep(
    db: &DatabaseConnection,
    email: &EmailService,
    today: NaiveDate,
) -> anyhow::Result<u32> {
    let repo = InvoiceRepository::new(db.clone());
    let swept = repo.sweep_overdue(today).await?;

    let mut sent = 0;
    for overdue in swept {
        let Some(owner_email) = overdue.owner.email.as_deref() else {
            continue;
        };

        let outcome = email
            .send_invoice_overdue_reminder(
                owner_email,
                &overdue.owner.name,
                &overdue.invoice.invoice_number,
                &format_gbp(overdue.invoice.total),
                overdue.invoice.due_date,
            )
            .await;

        match outcome {
            Ok(()) => {
                repo.mark_reminder_sent(overdue.invoice.id, today).await?;
                sent += 1;
            }
            Err(e) => {
                warn!(
                    invoice_id = %overdue.invoice.id,
                    error = %e,
                    "Overdue invoice reminder failed; will retry on next run"
                );
            }
        }
    }

    info!(sent, "Overdue invoice sweep finished");
    Ok(sent)
}
