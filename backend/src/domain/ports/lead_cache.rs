//! Port for the lead list query cache.
//!
//! The management workflow caches list results keyed by filter and
//! invalidates the whole entity cache after every mutation, accepting a
//! full refetch as the consistency mechanism rather than patching entries
//! in place.

use async_trait::async_trait;

use crate::domain::{Lead, LeadFilter};

/// Query cache over lead list results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadListCache: Send + Sync {
    /// Return the cached rows for a filter, if any.
    async fn get(&self, filter: &LeadFilter) -> Option<Vec<Lead>>;

    /// Store the rows served for a filter.
    async fn put(&self, filter: &LeadFilter, rows: &[Lead]);

    /// Drop every cached entry for the lead entity.
    async fn invalidate(&self);
}
