//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data` so they depend
//! only on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LeadIntake, LeadNotifier, LeadStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Public booking and contact submissions.
    pub intake: Arc<dyn LeadIntake>,
    /// Staff-facing lead listing and mutation.
    pub leads: Arc<dyn LeadStore>,
    /// Notification dispatch invoked through the function endpoint.
    pub notifier: Arc<dyn LeadNotifier>,
}

impl HttpState {
    /// Bundle the three ports the HTTP surface depends on.
    pub fn new(
        intake: Arc<dyn LeadIntake>,
        leads: Arc<dyn LeadStore>,
        notifier: Arc<dyn LeadNotifier>,
    ) -> Self {
        Self {
            intake,
            leads,
            notifier,
        }
    }
}
