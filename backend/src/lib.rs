//! Lead intake and notification backend.
//!
//! An HTTP service for a CCTV installation business: the public booking
//! form creates leads, staff browse and mutate them, and each new lead
//! triggers a best-effort email notification. Persistence lives in an
//! external row-API store; an in-memory adapter covers local development.
//!
//! The crate follows a hexagonal layout: `domain` holds the model, ports,
//! and workflow services; `inbound` adapts HTTP onto the driving ports;
//! `outbound` adapts the driven ports onto real collaborators; `server`
//! wires the two sides together from configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
