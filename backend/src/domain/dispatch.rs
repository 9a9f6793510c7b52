//! Staff notification dispatch service.
//!
//! Looks up the freshly created lead and emails a summary to the configured
//! admin address. When no delivery credential is configured the service
//! degrades gracefully: the attempt is logged and reported as skipped
//! rather than failed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    DispatchOutcome, EmailMessage, LeadNotifier, LeadStore, LeadStoreError, Mailer,
};
use crate::domain::{Error, Lead, LeadId, ServiceType};

/// Default recipient for lead notifications.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@ssksolutionzs.com";

/// Sender identity stamped on every notification email.
pub const SENDER: &str = "SSK Solutionzs <noreply@ssksolutionzs.com>";

const FIELD_NOT_PROVIDED: &str = "Not provided";
const SERVICE_NOT_SPECIFIED: &str = "Not specified";
const NO_MESSAGE: &str = "No message";

/// Service implementing the staff notification port.
#[derive(Clone)]
pub struct DispatchService {
    store: Arc<dyn LeadStore>,
    mailer: Option<Arc<dyn Mailer>>,
    admin_email: String,
}

impl DispatchService {
    /// Create a dispatcher over the given store and optional mailer.
    ///
    /// `mailer` is `None` when no delivery credential is configured; every
    /// notification is then handled as a logged skip.
    pub fn new(store: Arc<dyn LeadStore>, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self {
            store,
            mailer,
            admin_email: DEFAULT_ADMIN_EMAIL.to_owned(),
        }
    }

    /// Override the notification recipient.
    #[must_use]
    pub fn with_admin_email(mut self, admin_email: impl Into<String>) -> Self {
        self.admin_email = admin_email.into();
        self
    }

    fn map_store_error(error: &LeadStoreError) -> Error {
        match error {
            LeadStoreError::NotFound { .. } => Error::not_found("Lead not found"),
            _ => Error::internal("Failed to load lead"),
        }
    }
}

/// Build the notification subject line.
///
/// The service label falls back to "General Enquiry" when the lead carries
/// no service type.
pub fn subject(lead: &Lead) -> String {
    let service = lead
        .service_type
        .map_or("General Enquiry", |kind| kind.as_str());
    format!("New Lead: {} - {}", lead.name, service)
}

/// Render the HTML body listing the lead fields with placeholder text for
/// anything the submitter left out.
pub fn html_body(lead: &Lead) -> String {
    let email = lead.email.as_deref().unwrap_or(FIELD_NOT_PROVIDED);
    let location = lead.location.as_deref().unwrap_or(FIELD_NOT_PROVIDED);
    let service = lead
        .service_type
        .map_or(SERVICE_NOT_SPECIFIED, |kind| kind.as_str());
    let message = lead.message.as_deref().unwrap_or(NO_MESSAGE);
    format!(
        "<h2>New Lead Received</h2>\
         <table style=\"border-collapse: collapse;\">\
         <tr><td style=\"padding: 4px 12px 4px 0;\"><strong>Name</strong></td><td>{name}</td></tr>\
         <tr><td style=\"padding: 4px 12px 4px 0;\"><strong>Mobile</strong></td><td>{mobile}</td></tr>\
         <tr><td style=\"padding: 4px 12px 4px 0;\"><strong>Email</strong></td><td>{email}</td></tr>\
         <tr><td style=\"padding: 4px 12px 4px 0;\"><strong>Location</strong></td><td>{location}</td></tr>\
         <tr><td style=\"padding: 4px 12px 4px 0;\"><strong>Service</strong></td><td>{service}</td></tr>\
         <tr><td style=\"padding: 4px 12px 4px 0;\"><strong>Message</strong></td><td>{message}</td></tr>\
         </table>",
        name = lead.name,
        mobile = lead.mobile,
    )
}

#[async_trait]
impl LeadNotifier for DispatchService {
    async fn notify_new_lead(&self, lead_id: LeadId) -> Result<DispatchOutcome, Error> {
        let lead = self
            .store
            .fetch(&lead_id)
            .await
            .map_err(|err| {
                error!(lead_id = %lead_id, error = %err, "lead lookup failed");
                Self::map_store_error(&err)
            })?
            .ok_or_else(|| Error::not_found("Lead not found"))?;

        let Some(mailer) = &self.mailer else {
            // The skip outcome promises the lead was logged, so the event
            // must carry the lead itself, not just its identifier.
            info!(
                lead_id = %lead_id,
                name = %lead.name,
                mobile = %lead.mobile,
                email = lead.email.as_deref().unwrap_or(FIELD_NOT_PROVIDED),
                service = lead.service_type.map_or(SERVICE_NOT_SPECIFIED, ServiceType::as_str),
                created_at = %lead.created_at,
                "email delivery not configured; lead logged only"
            );
            return Ok(DispatchOutcome::Skipped);
        };

        let message = EmailMessage {
            from: SENDER.to_owned(),
            to: self.admin_email.clone(),
            subject: subject(&lead),
            html: html_body(&lead),
        };
        mailer.send(&message).await.map_err(|err| {
            error!(lead_id = %lead_id, error = %err, "notification email failed");
            Error::internal("Failed to send email")
        })?;

        info!(lead_id = %lead_id, to = %self.admin_email, "notification email sent");
        Ok(DispatchOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MailerError, MockLeadStore, MockMailer};
    use crate::domain::{LeadStatus, ServiceType};

    fn lead(service_type: Option<ServiceType>) -> Lead {
        let now = Utc::now();
        Lead {
            id: LeadId::random(),
            name: "Asha Rao".to_owned(),
            mobile: "9000000000".to_owned(),
            email: None,
            location: Some("12 Park St, Pune".to_owned()),
            service_type,
            message: None,
            status: LeadStatus::New,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn store_with(found: Option<Lead>) -> MockLeadStore {
        let mut store = MockLeadStore::new();
        store
            .expect_fetch()
            .times(1)
            .returning(move |_| Ok(found.clone()));
        store
    }

    #[rstest]
    #[case(Some(ServiceType::Repair), "New Lead: Asha Rao - repair")]
    #[case(None, "New Lead: Asha Rao - General Enquiry")]
    fn subject_falls_back_to_general_enquiry(#[case] kind: Option<ServiceType>, #[case] expected: &str) {
        assert_eq!(subject(&lead(kind)), expected);
    }

    #[test]
    fn body_uses_placeholders_for_absent_fields() {
        let body = html_body(&lead(None));
        assert!(body.contains("Asha Rao"));
        assert!(body.contains("Not provided"), "missing email placeholder");
        assert!(body.contains("Not specified"), "missing service placeholder");
        assert!(body.contains("No message"), "missing message placeholder");
        assert!(body.contains("12 Park St, Pune"));
    }

    #[tokio::test]
    async fn unknown_lead_reports_not_found() {
        let service = DispatchService::new(Arc::new(store_with(None)), None);
        let error = service
            .notify_new_lead(LeadId::random())
            .await
            .expect_err("lookup must fail");
        assert_eq!(error.code(), crate::domain::ErrorCode::NotFound);
        assert_eq!(error.message(), "Lead not found");
    }

    #[tokio::test]
    async fn missing_mailer_skips_without_error() {
        let found = lead(Some(ServiceType::Installation));
        let service = DispatchService::new(Arc::new(store_with(Some(found))), None);
        let outcome = service
            .notify_new_lead(LeadId::random())
            .await
            .expect("skip is a success");
        assert_eq!(outcome, DispatchOutcome::Skipped);
        assert_eq!(outcome.message(), "Lead logged (email not configured)");
    }

    /// Log sink capturing formatted events for assertions.
    #[derive(Clone, Default)]
    struct CaptureWriter(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CaptureWriter {
        fn contents(&self) -> String {
            let buffer = self
                .0
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            String::from_utf8_lossy(&buffer).into_owned()
        }
    }

    impl std::io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn skipped_dispatch_logs_the_lead_fields() {
        let writer = CaptureWriter::default();
        let sink = writer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || sink.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let found = lead(Some(ServiceType::Installation));
        let created_at = found.created_at;
        let service = DispatchService::new(Arc::new(store_with(Some(found))), None);
        service
            .notify_new_lead(LeadId::random())
            .await
            .expect("skip is a success");

        let log = writer.contents();
        assert!(log.contains("Asha Rao"));
        assert!(log.contains("9000000000"));
        assert!(log.contains("Not provided"), "absent email uses its placeholder");
        assert!(log.contains("installation"));
        assert!(log.contains(&created_at.format("%Y-%m-%d").to_string()));
    }

    #[tokio::test]
    async fn configured_mailer_sends_to_the_admin_address() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|message: &EmailMessage| {
                message.to == "ops@example.com"
                    && message.from == SENDER
                    && message.subject == "New Lead: Asha Rao - installation"
                    && message.html.contains("Asha Rao")
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = DispatchService::new(
            Arc::new(store_with(Some(lead(Some(ServiceType::Installation))))),
            Some(Arc::new(mailer)),
        )
        .with_admin_email("ops@example.com");

        let outcome = service
            .notify_new_lead(LeadId::random())
            .await
            .expect("send succeeds");
        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(outcome.message(), "Email notification sent");
    }

    #[tokio::test]
    async fn provider_rejection_surfaces_a_send_failure() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailerError::rejected(422, "invalid sender")));

        let service = DispatchService::new(
            Arc::new(store_with(Some(lead(None)))),
            Some(Arc::new(mailer)),
        );

        let error = service
            .notify_new_lead(LeadId::random())
            .await
            .expect_err("rejection must fail the dispatch");
        assert_eq!(error.message(), "Failed to send email");
    }
}
