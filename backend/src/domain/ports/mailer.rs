//! Port for the outbound email-delivery provider.

use async_trait::async_trait;

/// One email ready to hand to the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Sender in `Name <address>` form.
    pub from: String,
    /// Destination address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Failures raised by mailer adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// The provider could not be reached.
    #[error("email transport failed: {message}")]
    Transport {
        /// Diagnostic detail; never shown to end users.
        message: String,
    },
    /// The provider answered with a non-success status.
    #[error("email provider rejected the request: status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the provider.
        status: u16,
        /// Response body preview captured for diagnostics.
        body: String,
    },
}

impl MailerError {
    /// Transport failure with diagnostic detail.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Non-success provider response with a captured body preview.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }
}

/// Port for submitting a single email-send request.
///
/// Exactly one attempt per call; retry policy is the caller's concern (and
/// the notification pipeline deliberately has none).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Submit one send request to the delivery provider.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}
