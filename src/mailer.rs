use std::future::Future;

#[cfg(feature = "web")]
use lettre::message::header::ContentType;
#[cfg(feature = "web")]
use lettre::transport::smtp::authentication::Credentials;
#[cfg(feature = "web")]
use lettre::transport::smtp::client::{Tls, TlsParameters};
#[cfg(feature = "web")]
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[cfg(feature = "web")]
use crate::config::Config;
use crate::error::AppError;

/// A single outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Fixed thank-you letter sent to pending rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTemplate {
    pub subject: String,
    pub signature: String,
}

impl Default for ReplyTemplate {
    fn default() -> Self {
        Self {
            subject: "感謝您喜愛我們的產品！".to_string(),
            signature: "Yanwun".to_string(),
        }
    }
}

impl ReplyTemplate {
    /// Render the letter for one recipient
    pub fn letter_for(&self, name: &str, email: &str) -> Letter {
        Letter {
            to: email.to_string(),
            subject: self.subject.clone(),
            body: format!(
                "Hi {},\n\n感謝您喜歡我們的某項產品！我們很高興能為您服務。\n\nBest regards,\n{}",
                name, self.signature
            ),
        }
    }
}

/// Email transport used by the automation
pub trait Notifier: Send + Sync {
    fn send(&self, letter: &Letter) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// SMTP transport over implicit TLS
#[cfg(feature = "web")]
pub struct SmtpMailer {
    smtp: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

#[cfg(feature = "web")]
impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let creds = Credentials::new(config.email_user.clone(), config.email_pass.clone());

        let tls_parameters = TlsParameters::new(config.smtp_host.clone())
            .map_err(|e| AppError::Config(format!("invalid SMTP TLS settings: {}", e)))?;

        let smtp = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::Config(format!("invalid SMTP relay: {}", e)))?
            .credentials(creds)
            .port(config.smtp_port)
            .tls(Tls::Wrapper(tls_parameters))
            .build();

        Ok(SmtpMailer {
            smtp,
            from: config.email_user.clone(),
        })
    }
}

#[cfg(feature = "web")]
impl Notifier for SmtpMailer {
    async fn send(&self, letter: &Letter) -> Result<(), AppError> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::Mail(format!("invalid from address: {}", e)))?,
            )
            .to(letter
                .to
                .parse()
                .map_err(|e| AppError::Mail(format!("invalid recipient {}: {}", letter.to, e)))?)
            .subject(letter.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(letter.body.clone())
            .map_err(|e| AppError::Mail(e.to_string()))?;

        self.smtp
            .send(email)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;
        Ok(())
    }
}
