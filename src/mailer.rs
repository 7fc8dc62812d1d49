use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::Config;
use crate::error::ApiError;

/// Application mail sender. Sends are synchronous from the caller's point
/// of view: no retry, failures surface immediately.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.mail_from.clone(),
        })
    }

    async fn send(&self, to: &str, subject: &str, text: String) -> Result<(), ApiError> {
        let message = Message::builder()
            .from(self.from.parse().map_err(|e| ApiError::Mail(format!("{}", e)))?)
            .to(to.parse().map_err(|e| ApiError::Mail(format!("{}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(text)
            .map_err(|e| ApiError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ApiError::Mail(e.to_string()))?;

        info!(to, subject, "Mail sent");
        Ok(())
    }

    pub async fn send_otp_email(&self, to: &str, otp: &str) -> Result<(), ApiError> {
        let text = format!(
            "Dear Candidate,\n\nYour OTP for verification is: {}\n\
             Please enter this OTP to verify your email.\n\nThank you,\nNeb HR Team",
            otp
        );
        self.send(to, "Job Application OTP Verification", text).await
    }

    pub async fn send_confirmation_email(
        &self,
        to: &str,
        full_name: &str,
        job_title: &str,
    ) -> Result<(), ApiError> {
        let text = format!(
            "Dear {},\n\nYour application for the position '{}' has been successfully submitted.\n\
             Our HR team will review it and get back to you soon.\n\nBest Regards,\nNeb HR Team",
            full_name, job_title
        );
        self.send(to, "Job Application Submitted Successfully", text)
            .await
    }
}
