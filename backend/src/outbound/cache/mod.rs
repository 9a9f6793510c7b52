//! In-process query cache for lead listings.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::LeadListCache;
use crate::domain::{Lead, LeadFilter};

/// Cache keyed by the filter's stable key, invalidated wholesale after
/// every mutation.
#[derive(Default)]
pub struct MemoryLeadListCache {
    entries: Mutex<HashMap<String, Vec<Lead>>>,
}

impl MemoryLeadListCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadListCache for MemoryLeadListCache {
    async fn get(&self, filter: &LeadFilter) -> Option<Vec<Lead>> {
        self.entries.lock().await.get(&filter.cache_key()).cloned()
    }

    async fn put(&self, filter: &LeadFilter, rows: &[Lead]) {
        self.entries
            .lock()
            .await
            .insert(filter.cache_key(), rows.to_vec());
    }

    async fn invalidate(&self) {
        self.entries.lock().await.clear();
    }
}
