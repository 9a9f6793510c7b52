//! Headless staff workflow for browsing and mutating leads.
//!
//! The session owns the filter state, the displayed listing, an optional
//! detail editor, and the two-phase delete confirmation. Refreshes are
//! last-request-wins: each one takes a monotonically increasing token and a
//! completed fetch is applied only while its token is still the newest
//! issued, so out-of-order responses can never overwrite fresher data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::domain::ports::{LeadListCache, LeadStore, LeadStoreError};
use crate::domain::{Error, Lead, LeadFilter, LeadId, LeadPatch, LeadStatus, StatusFilter};

/// Listing state shown to staff. Loading and an empty result are distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// A fetch is outstanding and nothing has been applied yet.
    Loading,
    /// The most recent fetch completed with these rows.
    Loaded(Vec<Lead>),
    /// The most recent fetch failed with a user-facing message.
    Failed(String),
}

/// Editable detail state seeded from a selected lead.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadEditor {
    /// Identifier of the lead being edited.
    pub id: LeadId,
    /// Working copy of the status.
    pub status: LeadStatus,
    /// Working copy of the staff notes; empty clears them on save.
    pub admin_notes: String,
}

#[derive(Debug)]
struct SessionState {
    filter: LeadFilter,
    listing: Listing,
    editor: Option<LeadEditor>,
    pending_delete: Option<LeadId>,
}

/// One staff member's lead management session.
pub struct ManagementSession {
    store: Arc<dyn LeadStore>,
    cache: Arc<dyn LeadListCache>,
    state: Mutex<SessionState>,
    issued: AtomicU64,
}

impl ManagementSession {
    /// Create a session with the default filter and an empty listing.
    pub fn new(store: Arc<dyn LeadStore>, cache: Arc<dyn LeadListCache>) -> Self {
        Self {
            store,
            cache,
            state: Mutex::new(SessionState {
                filter: LeadFilter::default(),
                listing: Listing::Loading,
                editor: None,
                pending_delete: None,
            }),
            issued: AtomicU64::new(0),
        }
    }

    /// Current listing state.
    pub async fn listing(&self) -> Listing {
        self.state.lock().await.listing.clone()
    }

    /// Current filter.
    pub async fn filter(&self) -> LeadFilter {
        self.state.lock().await.filter.clone()
    }

    /// Currently open detail editor, if any.
    pub async fn editor(&self) -> Option<LeadEditor> {
        self.state.lock().await.editor.clone()
    }

    /// Lead awaiting delete confirmation, if any.
    pub async fn pending_delete(&self) -> Option<LeadId> {
        self.state.lock().await.pending_delete
    }

    /// Replace the status constraint and refetch.
    pub async fn set_status_filter(&self, status: StatusFilter) {
        {
            let mut state = self.state.lock().await;
            state.filter.status = status;
        }
        self.refresh().await;
    }

    /// Replace the search term and refetch. Blank terms clear the search.
    pub async fn set_search(&self, search: Option<&str>) {
        {
            let mut state = self.state.lock().await;
            state.filter.search = search
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_owned);
        }
        self.refresh().await;
    }

    /// Fetch the listing for the current filter.
    ///
    /// Serves from the query cache when possible; a store fetch populates
    /// the cache on success. Whatever the outcome, it is applied only while
    /// this call is still the newest issued request.
    pub async fn refresh(&self) {
        let (token, filter) = {
            let mut state = self.state.lock().await;
            let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.listing = Listing::Loading;
            (token, state.filter.clone())
        };

        if let Some(rows) = self.cache.get(&filter).await {
            self.apply(token, Listing::Loaded(rows)).await;
            return;
        }

        let listing = match self.store.list(&filter).await {
            Ok(rows) => {
                self.cache.put(&filter, &rows).await;
                Listing::Loaded(rows)
            }
            Err(err) => {
                error!(error = %err, "lead listing failed");
                Listing::Failed("Unable to load leads".to_owned())
            }
        };
        self.apply(token, listing).await;
    }

    async fn apply(&self, token: u64, listing: Listing) {
        if token != self.issued.load(Ordering::SeqCst) {
            debug!(token, "discarding stale listing response");
            return;
        }
        let mut state = self.state.lock().await;
        state.listing = listing;
    }

    /// Open the detail editor for a lead in the current listing.
    ///
    /// The editor is seeded from the displayed record; selecting a lead that
    /// is not on screen is rejected.
    pub async fn select(&self, id: LeadId) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let Listing::Loaded(rows) = &state.listing else {
            return Err(Error::invalid_request("No leads loaded"));
        };
        let lead = rows
            .iter()
            .find(|lead| lead.id == id)
            .ok_or_else(|| Error::not_found("Lead not found"))?;
        state.editor = Some(LeadEditor {
            id,
            status: lead.status,
            admin_notes: lead.admin_notes.clone().unwrap_or_default(),
        });
        Ok(())
    }

    /// Update the working status in the open editor.
    pub async fn edit_status(&self, status: LeadStatus) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let editor = state
            .editor
            .as_mut()
            .ok_or_else(|| Error::invalid_request("No lead selected"))?;
        editor.status = status;
        Ok(())
    }

    /// Update the working notes in the open editor.
    pub async fn edit_notes(&self, notes: &str) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        let editor = state
            .editor
            .as_mut()
            .ok_or_else(|| Error::invalid_request("No lead selected"))?;
        editor.admin_notes = notes.to_owned();
        Ok(())
    }

    /// Close the detail editor, discarding unsaved edits.
    pub async fn close_editor(&self) {
        self.state.lock().await.editor = None;
    }

    /// Persist the open editor's status and notes.
    ///
    /// On success the editor closes, the query cache is invalidated, and
    /// the listing refetches. On failure the editor stays open with the
    /// staff member's edits intact.
    pub async fn save(&self) -> Result<(), Error> {
        let editor = {
            let state = self.state.lock().await;
            state
                .editor
                .clone()
                .ok_or_else(|| Error::invalid_request("No lead selected"))?
        };

        let patch = LeadPatch {
            status: Some(editor.status),
            admin_notes: Some(editor.admin_notes.clone()),
        };
        self.store.update(&editor.id, &patch).await.map_err(|err| {
            error!(lead_id = %editor.id, error = %err, "lead update failed");
            map_mutation_error(&err, "Unable to save changes")
        })?;

        self.cache.invalidate().await;
        {
            let mut state = self.state.lock().await;
            state.editor = None;
        }
        self.refresh().await;
        Ok(())
    }

    /// First phase of deletion: mark a lead as awaiting confirmation.
    pub async fn request_delete(&self, id: LeadId) {
        self.state.lock().await.pending_delete = Some(id);
    }

    /// Abort a pending deletion.
    pub async fn cancel_delete(&self) {
        self.state.lock().await.pending_delete = None;
    }

    /// Second phase of deletion: remove the confirmed lead.
    ///
    /// On success the confirmation clears, any editor on the deleted lead
    /// closes, the cache is invalidated, and the listing refetches. On
    /// failure the confirmation stays pending.
    pub async fn confirm_delete(&self) -> Result<(), Error> {
        let id = {
            let state = self.state.lock().await;
            state
                .pending_delete
                .ok_or_else(|| Error::invalid_request("No deletion pending"))?
        };

        self.store.delete(&id).await.map_err(|err| {
            error!(lead_id = %id, error = %err, "lead deletion failed");
            map_mutation_error(&err, "Unable to delete lead")
        })?;

        self.cache.invalidate().await;
        {
            let mut state = self.state.lock().await;
            state.pending_delete = None;
            if state.editor.as_ref().is_some_and(|editor| editor.id == id) {
                state.editor = None;
            }
        }
        self.refresh().await;
        Ok(())
    }
}

fn map_mutation_error(error: &LeadStoreError, fallback: &str) -> Error {
    match error {
        LeadStoreError::NotFound { .. } => Error::not_found("Lead not found"),
        LeadStoreError::Connection { .. } => Error::service_unavailable(fallback),
        LeadStoreError::Query { .. } => Error::internal(fallback),
    }
}
