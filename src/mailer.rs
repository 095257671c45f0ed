use crate::config::Config;
use crate::errors::AppError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

/// Outbound mail relay wrapper.
///
/// Authenticates against the configured SMTP host over STARTTLS and sends
/// one plain-text message per call. The transport carries a short fixed
/// timeout; expiry surfaces as a transmission failure.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::TransmissionFailed(format!("Failed to create SMTP transport: {}", e))
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_email.clone(),
                config.smtp_password.clone(),
            ))
            .timeout(Some(Duration::from_secs(10)))
            .build();

        Ok(Self {
            transport,
            sender: config.smtp_email.clone(),
        })
    }

    /// Sends one plain-text message from the service identity.
    pub async fn send_plain(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), AppError> {
        let from: Mailbox = self.sender.parse().map_err(|e| {
            AppError::TransmissionFailed(format!("Invalid sender address '{}': {}", self.sender, e))
        })?;
        let to: Mailbox = recipient.parse().map_err(|e| {
            AppError::TransmissionFailed(format!("Invalid recipient address '{}': {}", recipient, e))
        })?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| {
                AppError::TransmissionFailed(format!("Failed to compose message: {}", e))
            })?;

        self.transport.send(message).await.map_err(|e| {
            AppError::TransmissionFailed(format!("SMTP delivery to {} failed: {}", recipient, e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgresql://test".to_string(),
            port: 8000,
            llm_endpoint_url: "https://example.com/model".to_string(),
            llm_api_token: "token".to_string(),
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_email: "service@example.com".to_string(),
            smtp_password: "password".to_string(),
        }
    }

    #[test]
    fn test_mailer_creation() {
        let mailer = Mailer::new(&test_config());
        assert!(mailer.is_ok());
    }
}
