//! Email service for sending reminder notifications.
//!
//! Uses `lettre` for SMTP transport. Message composition for the daily
//! reminder jobs lives here so the scheduler binary stays a thin wrapper.

use chrono::NaiveDate;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for sending reminder notifications.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Creates an SMTP transport.
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
                .map_err(|e| EmailError::SendError(e.to_string()))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build(),
        )
    }

    /// Sends a vaccination-due reminder to the horse's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_vaccination_reminder(
        &self,
        to_email: &str,
        owner_name: &str,
        horse_name: &str,
        vaccination_name: &str,
        due_date: NaiveDate,
    ) -> Result<(), EmailError> {
        let subject = format!("Vaccination Due: {horse_name} - {vaccination_name}");
        let body = format!(
            r"Hi {owner_name},

{horse_name} is due a {vaccination_name} vaccination on {due_date}.

Please arrange an appointment with your vet before the due date.

Best regards,
{from_name}",
            from_name = self.config.from_name,
        );

        self.send_email(to_email, &subject, &body).await
    }

    /// Sends a farrier-due reminder to the horse's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_farrier_reminder(
        &self,
        to_email: &str,
        owner_name: &str,
        horse_name: &str,
        due_date: NaiveDate,
    ) -> Result<(), EmailError> {
        let subject = format!("Farrier Due: {horse_name}");
        let body = format!(
            r"Hi {owner_name},

{horse_name} is due a farrier visit on {due_date}.

Best regards,
{from_name}",
            from_name = self.config.from_name,
        );

        self.send_email(to_email, &subject, &body).await
    }

    /// Sends an overdue-invoice reminder to the owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_invoice_overdue_reminder(
        &self,
        to_email: &str,
        owner_name: &str,
        invoice_number: &str,
        total: &str,
        due_date: NaiveDate,
    ) -> Result<(), EmailError> {
        let subject = format!("Payment Overdue: Invoice {invoice_number}");
        let body = format!(
            r"Hi {owner_name},

Invoice {invoice_number} for {total} was due on {due_date} and is now overdue.

If you have already made payment, please disregard this reminder.

Best regards,
{from_name}",
            from_name = self.config.from_name,
        );

        self.send_email(to_email, &subject, &body).await
    }

    /// Sends a generic plain-text email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_recipient_is_rejected_before_transport() {
        let service = EmailService::new(EmailConfig::default());
        let result = service.send_email("not an address", "s", "b").await;
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }

    #[test]
    fn test_transport_builds_from_default_config() {
        let service = EmailService::new(EmailConfig::default());
        assert!(service.create_transport().is_ok());
    }
}
