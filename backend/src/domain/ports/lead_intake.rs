//! Driving port for public lead intake.

use async_trait::async_trait;

use crate::domain::{Error, Lead, ServiceType};

/// Raw intake submission as collected by the public booking or contact
/// form, before validation and normalisation.
///
/// Only the fields below participate in the stored lead; booking-only
/// details (pincode, preferred date and time slot, attachments) are part of
/// the form surface and are handled by the inbound adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeSubmission {
    /// Contact name; required, validated non-blank after trimming.
    pub name: String,
    /// Contact mobile; required, validated non-blank after trimming.
    pub mobile: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional street address; combined with `city` into the location.
    pub address: Option<String>,
    /// Optional city; combined with `address` into the location.
    pub city: Option<String>,
    /// Optional requested service.
    pub service_type: Option<ServiceType>,
    /// Optional free-text description of the issue or requirement.
    pub description: Option<String>,
}

/// Port for submitting a validated intake request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadIntake: Send + Sync {
    /// Validate, persist, and schedule the best-effort notification.
    ///
    /// Returns the created lead; notification failures never surface here.
    async fn submit(&self, submission: IntakeSubmission) -> Result<Lead, Error>;
}
