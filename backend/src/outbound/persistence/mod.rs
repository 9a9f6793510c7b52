//! Lead store adapters: the hosted row API and an in-memory fallback.

mod dto;
mod memory_lead_store;
mod rest_lead_store;

pub use memory_lead_store::MemoryLeadStore;
pub use rest_lead_store::{RestLeadStore, RestLeadStoreBuildError, filter_query_pairs};
