//! Driving port for the staff notification step.
//!
//! The intake workflow invokes this after a successful creation, in a
//! detached task whose failure is logged and never surfaced. Production
//! wires the in-process dispatch service; an HTTP adapter exists for
//! deployments where the dispatcher runs as a separate function.

use async_trait::async_trait;

use crate::domain::{Error, LeadId};

/// Outcome of a handled notification attempt.
///
/// A skipped notification is a success: absence of email configuration is a
/// deliberate degrade-gracefully policy, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// An email was submitted to the delivery provider.
    Sent,
    /// No email credential is configured; the lead was logged instead.
    Skipped,
}

impl DispatchOutcome {
    /// Human-readable summary returned in the notification envelope.
    pub fn message(self) -> &'static str {
        match self {
            Self::Sent => "Email notification sent",
            Self::Skipped => "Lead logged (email not configured)",
        }
    }
}

/// Port for notifying staff about a freshly created lead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Attempt one best-effort notification for the given lead.
    async fn notify_new_lead(&self, lead_id: LeadId) -> Result<DispatchOutcome, Error>;
}

/// Notifier that does nothing and reports a skipped dispatch.
///
/// Useful as a default in tests and local setups without a dispatcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLeadNotifier;

#[async_trait]
impl LeadNotifier for FixtureLeadNotifier {
    async fn notify_new_lead(&self, _lead_id: LeadId) -> Result<DispatchOutcome, Error> {
        Ok(DispatchOutcome::Skipped)
    }
}
