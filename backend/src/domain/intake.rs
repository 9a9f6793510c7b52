//! Lead intake service.
//!
//! Coordinates the public submission path: validate and normalise the raw
//! form fields, persist through the store port, then schedule a detached
//! best-effort notification. A notification failure is logged at warn and
//! never surfaces to the submitting user, nor does it roll back the created
//! lead.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::ports::{IntakeSubmission, LeadIntake, LeadNotifier, LeadStore, LeadStoreError};
use crate::domain::{Error, Lead, LeadId, LeadValidationError, NewLead};

/// Service implementing the public intake port.
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn LeadStore>,
    notifier: Arc<dyn LeadNotifier>,
}

impl IntakeService {
    /// Create a new service over the given store and notifier.
    pub fn new(store: Arc<dyn LeadStore>, notifier: Arc<dyn LeadNotifier>) -> Self {
        Self { store, notifier }
    }

    fn map_validation_error(error: LeadValidationError) -> Error {
        let field = match error {
            LeadValidationError::MissingName => "name",
            LeadValidationError::MissingMobile => "mobile",
        };
        Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
            "field": field,
            "code": "missing_field",
        }))
    }

    fn map_store_error(error: &LeadStoreError) -> Error {
        match error {
            LeadStoreError::Connection { .. } => {
                Error::service_unavailable("Unable to submit your request right now")
            }
            _ => Error::internal("Unable to submit your request right now"),
        }
    }

    fn spawn_notification(&self, lead_id: LeadId) {
        let notifier = Arc::clone(&self.notifier);
        // Detached continuation: the user-facing success path never awaits
        // this handle and a failure here must not abort the booking flow.
        tokio::spawn(async move {
            match notifier.notify_new_lead(lead_id).await {
                Ok(outcome) => {
                    debug!(lead_id = %lead_id, outcome = outcome.message(), "lead notification handled");
                }
                Err(err) => {
                    warn!(lead_id = %lead_id, error = %err, "lead notification failed");
                }
            }
        });
    }
}

/// Compose the free-text location from the address and city fields.
///
/// Both present: `"<address>, <city>"`. One present: that one. Blank parts
/// count as absent.
pub fn compose_location(address: Option<&str>, city: Option<&str>) -> Option<String> {
    let address = address.map(str::trim).filter(|part| !part.is_empty());
    let city = city.map(str::trim).filter(|part| !part.is_empty());
    match (address, city) {
        (Some(address), Some(city)) => Some(format!("{address}, {city}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_owned()),
        (None, None) => None,
    }
}

#[async_trait]
impl LeadIntake for IntakeService {
    async fn submit(&self, submission: IntakeSubmission) -> Result<Lead, Error> {
        let location = compose_location(submission.address.as_deref(), submission.city.as_deref());
        let input = NewLead::new(&submission.name, &submission.mobile)
            .map_err(Self::map_validation_error)?
            .with_email(submission.email.as_deref())
            .with_location(location.as_deref())
            .with_service_type(submission.service_type)
            .with_message(submission.description.as_deref());

        let lead = self.store.create(&input).await.map_err(|err| {
            error!(error = %err, "lead creation failed");
            Self::map_store_error(&err)
        })?;

        self.spawn_notification(lead.id);
        Ok(lead)
    }
}
