//! Domain layer: lead model, ports, and workflow services.

mod dispatch;
mod error;
mod intake;
mod lead;
mod management;
pub mod ports;

pub use dispatch::{DEFAULT_ADMIN_EMAIL, DispatchService, SENDER, html_body, subject};
pub use error::{Error, ErrorCode};
pub use intake::{IntakeService, compose_location};
pub use lead::{
    Lead, LeadFilter, LeadId, LeadPatch, LeadStatus, LeadStatusParseError, LeadValidationError,
    NewLead, ServiceType, ServiceTypeParseError, StatusFilter,
};
pub use management::{LeadEditor, Listing, ManagementSession};
