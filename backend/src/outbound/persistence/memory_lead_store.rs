//! In-memory lead store for local development and integration tests.
//!
//! Honours the full store contract: status forced to `New` on create,
//! newest-first listing, partial updates that refresh `updated_at`, and
//! idempotent deletes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;

use crate::domain::ports::{LeadStore, LeadStoreError};
use crate::domain::{Lead, LeadFilter, LeadId, LeadPatch, LeadStatus, NewLead};

/// Lead store backed by a mutex-guarded vector.
pub struct MemoryLeadStore {
    rows: Mutex<Vec<Lead>>,
    clock: Arc<dyn Clock>,
}

impl MemoryLeadStore {
    /// Create an empty store reading time from the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clock,
        }
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create(&self, input: &NewLead) -> Result<Lead, LeadStoreError> {
        let now = self.clock.utc();
        let lead = Lead {
            id: LeadId::random(),
            name: input.name().to_owned(),
            mobile: input.mobile().to_owned(),
            email: input.email().map(str::to_owned),
            location: input.location().map(str::to_owned),
            service_type: input.service_type(),
            message: input.message().map(str::to_owned),
            status: LeadStatus::New,
            admin_notes: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().await.push(lead.clone());
        Ok(lead)
    }

    async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadStoreError> {
        let rows = self.rows.lock().await;
        let mut matched: Vec<Lead> = rows
            .iter()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn fetch(&self, id: &LeadId) -> Result<Option<Lead>, LeadStoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|lead| lead.id == *id).cloned())
    }

    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> Result<Lead, LeadStoreError> {
        let mut rows = self.rows.lock().await;
        let lead = rows
            .iter_mut()
            .find(|lead| lead.id == *id)
            .ok_or_else(|| LeadStoreError::not_found(*id))?;
        if let Some(status) = patch.status {
            lead.status = status;
        }
        if let Some(notes) = &patch.admin_notes {
            let trimmed = notes.trim();
            lead.admin_notes = if trimmed.is_empty() {
                None
            } else {
                Some(notes.clone())
            };
        }
        // updated_at never precedes created_at even with a skewed clock.
        lead.updated_at = self.clock.utc().max(lead.created_at);
        Ok(lead.clone())
    }

    async fn delete(&self, id: &LeadId) -> Result<(), LeadStoreError> {
        let mut rows = self.rows.lock().await;
        rows.retain(|lead| lead.id != *id);
        Ok(())
    }
}
