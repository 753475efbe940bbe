//! Daily notification job runner for Paddock.
//!
//! An external scheduler (cron) invokes this binary once a day. Each job
//! takes today's date, sends the due reminders, and prints the count sent.
//! Jobs are idempotent per day: re-running sends nothing new, because each
//! record's last-reminder date is advanced only after a confirmed send.
//! A failed send is logged and retried naturally on the next daily run.
//!
//! Usage:
//!   scheduler vaccination-reminders
//!   scheduler farrier-reminders
//!   scheduler invoice-overdue-sweep
//!   scheduler all

mod jobs;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paddock_shared::{AppConfig, EmailService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paddock=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let job = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());

    let config = AppConfig::load().expect("Failed to load configuration");
    let db = paddock_db::connect(&config.database.url).await?;
    let email = EmailService::new(config.email.clone());
    let today = chrono::Utc::now().date_naive();

    match job.as_str() {
        "vaccination-reminders" => {
            let sent = jobs::vaccination_reminders(&db, &email, today).await?;
            info!(sent, "Sent {sent} vaccination reminders");
        }
        "farrier-reminders" => {
            let sent =
                jobs::farrier_reminders(&db, &email, today, config.billing.farrier_lookahead_days)
                    .await?;
            info!(sent, "Sent {sent} farrier reminders");
        }
        "invoice-overdue-sweep" => {
            let sent = jobs::invoice_overdue_sweep(&db, &email, today).await?;
            info!(sent, "Sent {sent} overdue invoice reminders");
        }
        "all" => {
            let vaccinations = jobs::vaccination_reminders(&db, &email, today).await?;
            let farrier =
                jobs::farrier_reminders(&db, &email, today, config.billing.farrier_lookahead_days)
                    .await?;
            let overdue = jobs::invoice_overdue_sweep(&db, &email, today).await?;
            info!(
                vaccinations,
                farrier, overdue, "Daily notification jobs complete"
            );
        }
        other => {
            anyhow::bail!(
                "Unknown job '{other}'. Jobs: vaccination-reminders, farrier-reminders, \
                 invoice-overdue-sweep, all"
            );
        }
    }

    Ok(())
}
