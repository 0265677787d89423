//! Outbound email for password-reset links.
//!
//! Delivery never fails the caller: every outcome is reported as a
//! [`NotifierResult`] and the auth flow decides how to degrade.

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::{
    EmailSettings, EmailTransport, GMAIL_SMTP_HOST, RESET_EMAIL_SUBJECT,
    RESET_TOKEN_LIFETIME_MINUTES,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outcome of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierResult {
    Sent,
    /// No transport configured; nothing was attempted
    NotConfigured,
    /// Transport rejected the message
    Failed(String),
}

impl NotifierResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotifierResult::Sent)
    }
}

/// Reset-link notifier trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether a transport is available at all
    fn is_configured(&self) -> bool;

    /// Email `reset_link` to `to`, greeting the user as `display_name`
    async fn send_password_reset(
        &self,
        to: &str,
        display_name: &str,
        reset_link: &str,
    ) -> NotifierResult;
}

/// SMTP notifier backed by lettre.
pub struct MailNotifier {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl MailNotifier {
    /// Build the transport from settings. Missing settings yield an
    /// unconfigured notifier; malformed ones are a configuration error.
    pub fn from_settings(settings: &EmailSettings) -> AppResult<Self> {
        let Some(transport) = settings.transport.as_ref() else {
            return Ok(Self::disabled());
        };

        let mailer = match transport {
            EmailTransport::Smtp {
                host,
                port,
                secure,
                username,
                password,
            } => {
                let builder = if *secure {
                    AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                }
                .map_err(|e| AppError::configuration(format!("SMTP relay {}: {}", host, e)))?;

                builder
                    .port(*port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build()
            }
            EmailTransport::Gmail {
                username,
                app_password,
            } => AsyncSmtpTransport::<Tokio1Executor>::relay(GMAIL_SMTP_HOST)
                .map_err(|e| AppError::configuration(format!("Gmail relay: {}", e)))?
                .credentials(Credentials::new(username.clone(), app_password.clone()))
                .build(),
        };

        let from = settings
            .sender()
            .map(|sender| {
                sender.parse::<Mailbox>().map_err(|e| {
                    AppError::configuration(format!("Invalid sender address {}: {}", sender, e))
                })
            })
            .transpose()?;

        tracing::info!(method = transport.method(), "Email transport configured");

        Ok(Self {
            mailer: Some(mailer),
            from,
        })
    }

    /// Notifier that never sends.
    pub fn disabled() -> Self {
        Self {
            mailer: None,
            from: None,
        }
    }

    fn build_message(
        &self,
        to: &str,
        display_name: &str,
        reset_link: &str,
    ) -> Result<Message, String> {
        let from = self
            .from
            .clone()
            .ok_or_else(|| "No sender address configured".to_string())?;
        let to = to.parse::<Mailbox>().map_err(|e| e.to_string())?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(RESET_EMAIL_SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                reset_email_text(display_name, reset_link),
                reset_email_html(display_name, reset_link),
            ))
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    fn is_configured(&self) -> bool {
        self.mailer.is_some()
    }

    async fn send_password_reset(
        &self,
        to: &str,
        display_name: &str,
        reset_link: &str,
    ) -> NotifierResult {
        let Some(mailer) = self.mailer.as_ref() else {
            return NotifierResult::NotConfigured;
        };

        let message = match self.build_message(to, display_name, reset_link) {
            Ok(message) => message,
            Err(reason) => return NotifierResult::Failed(reason),
        };

        match mailer.send(message).await {
            Ok(_) => NotifierResult::Sent,
            Err(e) => NotifierResult::Failed(e.to_string()),
        }
    }
}

/// Plain-text body of the reset email.
pub fn reset_email_text(display_name: &str, reset_link: &str) -> String {
    format!(
        "Hello {display_name},\n\n\
         We received a request to reset the password of your EDL account.\n\n\
         Open the following link to choose a new password:\n{reset_link}\n\n\
         This link expires in {RESET_TOKEN_LIFETIME_MINUTES} minutes.\n\n\
         If you did not request a reset, ignore this email.\n"
    )
}

/// HTML body of the reset email.
pub fn reset_email_html(display_name: &str, reset_link: &str) -> String {
    let name = escape_html(display_name);
    let link = escape_html(reset_link);

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password reset</h2>
    <p>Hello <strong>{name}</strong>,</p>
    <p>We received a request to reset the password of your EDL account.</p>
    <p style="text-align: center;"><a href="{link}">Reset password</a></p>
    <p>Or copy this link into your browser:</p>
    <p style="word-break: break-all;">{link}</p>
    <p><strong>This link expires in {RESET_TOKEN_LIFETIME_MINUTES} minutes.</strong>
       If you did not request a reset, ignore this email and do not share the link.</p>
  </div>
</body>
</html>
"#
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_notifier_reports_not_configured() {
        let notifier = MailNotifier::from_settings(&EmailSettings::default()).unwrap();

        assert!(!notifier.is_configured());
        assert_eq!(
            notifier
                .send_password_reset("a@example.com", "Ana", "http://x/forgot-password?token=t")
                .await,
            NotifierResult::NotConfigured
        );
    }

    #[tokio::test]
    async fn test_invalid_sender_is_configuration_error() {
        let settings = EmailSettings {
            transport: Some(EmailTransport::Gmail {
                username: "not-an-address".into(),
                app_password: "pw".into(),
            }),
            from: None,
        };

        assert!(matches!(
            MailNotifier::from_settings(&settings),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_bodies_carry_link_and_expiry() {
        let link = "https://edl.example.com/forgot-password?token=abc";
        let text = reset_email_text("Ana", link);
        let html = reset_email_html("Ana", link);

        assert!(text.contains(link));
        assert!(text.contains("15 minutes"));
        assert!(html.contains(link));
        assert!(html.contains("15 minutes"));
    }

    #[test]
    fn test_html_escapes_display_name() {
        let html = reset_email_html("<script>", "https://x");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_invalid_recipient_fails_build() {
        let notifier = MailNotifier {
            mailer: None,
            from: Some("noreply@example.com".parse().unwrap()),
        };
        assert!(notifier.build_message("not an address", "Ana", "https://x").is_err());
    }
}
