//! Port abstraction over the external lead record store.
//!
//! The store itself is a hosted collaborator exposing a row-based table API;
//! this crate only consumes its contract. Adapters translate transport
//! failures into [`LeadStoreError`] so services can stay transport agnostic.

use async_trait::async_trait;

use crate::domain::{Lead, LeadFilter, LeadId, LeadPatch, NewLead};

/// Failures raised by lead store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadStoreError {
    /// The store could not be reached at all.
    #[error("lead store connection failed: {message}")]
    Connection {
        /// Diagnostic detail; never shown to end users.
        message: String,
    },
    /// The store answered but the query or mutation failed.
    #[error("lead store query failed: {message}")]
    Query {
        /// Diagnostic detail; never shown to end users.
        message: String,
    },
    /// The targeted record does not exist.
    #[error("lead {id} not found")]
    NotFound {
        /// Identifier that failed to resolve.
        id: LeadId,
    },
}

impl LeadStoreError {
    /// Connection failure with diagnostic detail.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with diagnostic detail.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Missing-record failure for the given identifier.
    pub fn not_found(id: LeadId) -> Self {
        Self::NotFound { id }
    }
}

/// Contract consumed from the lead record store.
///
/// Semantics required of every adapter:
///
/// - `create` persists with status forced to `New` regardless of caller
///   input and returns the full stored record.
/// - `list` orders by `created_at` descending and returns an empty sequence
///   (not an error) when nothing matches.
/// - `update` applies only the supplied fields and refreshes `updated_at`.
/// - `delete` of a missing identifier is idempotent success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persist a new lead and return the stored record.
    async fn create(&self, input: &NewLead) -> Result<Lead, LeadStoreError>;

    /// List leads matching the filter, most recent first.
    async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadStoreError>;

    /// Fetch a single lead by identifier.
    async fn fetch(&self, id: &LeadId) -> Result<Option<Lead>, LeadStoreError>;

    /// Apply a partial update and return the full updated record.
    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> Result<Lead, LeadStoreError>;

    /// Remove a lead; succeeds even when the record is already gone.
    async fn delete(&self, id: &LeadId) -> Result<(), LeadStoreError>;
}
