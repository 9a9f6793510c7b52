//! Domain ports and supporting types for the hexagonal boundary.

mod lead_cache;
mod lead_intake;
mod lead_notifier;
mod lead_store;
mod mailer;

#[cfg(test)]
pub use lead_cache::MockLeadListCache;
pub use lead_cache::LeadListCache;
#[cfg(test)]
pub use lead_intake::MockLeadIntake;
pub use lead_intake::{IntakeSubmission, LeadIntake};
#[cfg(test)]
pub use lead_notifier::MockLeadNotifier;
pub use lead_notifier::{DispatchOutcome, FixtureLeadNotifier, LeadNotifier};
#[cfg(test)]
pub use lead_store::MockLeadStore;
pub use lead_store::{LeadStore, LeadStoreError};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{EmailMessage, Mailer, MailerError};
