//! Reqwest-backed adapter for the hosted lead store's row API.
//!
//! This adapter owns transport details only: query construction, auth
//! headers, HTTP error mapping, and JSON decoding into domain leads. The
//! hosted API follows PostgREST conventions: column filters as query pairs
//! (`status=eq.New`), `or=(...)` disjunctions, and `Prefer:
//! return=representation` to get mutated rows back.

use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, StatusCode, Url};
use std::sync::Arc;

use super::dto::{CreateLeadRow, LeadPatchRow, LeadRow};
use crate::domain::ports::{LeadStore, LeadStoreError};
use crate::domain::{Lead, LeadFilter, LeadId, LeadPatch, NewLead, StatusFilter};
use crate::outbound::body_preview;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const LEADS_RESOURCE: &str = "rest/v1/leads";

/// Lead store adapter speaking HTTP to one hosted row-API endpoint.
pub struct RestLeadStore {
    client: Client,
    leads_url: Url,
    api_key: String,
    clock: Arc<dyn Clock>,
}

impl RestLeadStore {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot address the leads resource
    /// or the reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RestLeadStoreBuildError> {
        Self::with_timeout(base_url, api_key, clock, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot address the leads resource
    /// or the reqwest client cannot be constructed.
    pub fn with_timeout(
        base_url: &Url,
        api_key: impl Into<String>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Result<Self, RestLeadStoreBuildError> {
        let leads_url = base_url
            .join(LEADS_RESOURCE)
            .map_err(|err| RestLeadStoreBuildError::BaseUrl(err.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RestLeadStoreBuildError::Client(err.to_string()))?;
        Ok(Self {
            client,
            leads_url,
            api_key: api_key.into(),
            clock,
        })
    }

    fn request(&self, method: reqwest::Method, pairs: &[(String, String)]) -> reqwest::RequestBuilder {
        let mut url = self.leads_url.clone();
        url.query_pairs_mut().extend_pairs(pairs);
        self.client
            .request(method, url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
    }

    async fn read_rows(response: reqwest::Response) -> Result<Vec<Lead>, LeadStoreError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let rows: Vec<LeadRow> = serde_json::from_slice(body.as_ref())
            .map_err(|err| LeadStoreError::query(format!("invalid lead row payload: {err}")))?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(LeadStoreError::query))
            .collect()
    }
}

/// Failures constructing the REST adapter.
#[derive(Debug, thiserror::Error)]
pub enum RestLeadStoreBuildError {
    /// The configured base URL cannot address the leads resource.
    #[error("invalid store base URL: {0}")]
    BaseUrl(String),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

#[async_trait]
impl LeadStore for RestLeadStore {
    async fn create(&self, input: &NewLead) -> Result<Lead, LeadStoreError> {
        let response = self
            .request(reqwest::Method::POST, &[])
            .header("Prefer", "return=representation")
            .json(&CreateLeadRow::from_input(input))
            .send()
            .await
            .map_err(map_transport_error)?;
        let mut rows = Self::read_rows(response).await?;
        rows.pop()
            .ok_or_else(|| LeadStoreError::query("insert returned no representation"))
    }

    async fn list(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadStoreError> {
        let pairs = filter_query_pairs(filter);
        let response = self
            .request(reqwest::Method::GET, &pairs)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_rows(response).await
    }

    async fn fetch(&self, id: &LeadId) -> Result<Option<Lead>, LeadStoreError> {
        let pairs = vec![
            ("select".to_owned(), "*".to_owned()),
            ("id".to_owned(), format!("eq.{id}")),
            ("limit".to_owned(), "1".to_owned()),
        ];
        let response = self
            .request(reqwest::Method::GET, &pairs)
            .send()
            .await
            .map_err(map_transport_error)?;
        let mut rows = Self::read_rows(response).await?;
        Ok(rows.pop())
    }

    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> Result<Lead, LeadStoreError> {
        let pairs = vec![("id".to_owned(), format!("eq.{id}"))];
        let response = self
            .request(reqwest::Method::PATCH, &pairs)
            .header("Prefer", "return=representation")
            .json(&LeadPatchRow::from_patch(patch, self.clock.utc()))
            .send()
            .await
            .map_err(map_transport_error)?;
        let mut rows = Self::read_rows(response).await?;
        // An empty representation means the filter matched no row.
        rows.pop().ok_or_else(|| LeadStoreError::not_found(*id))
    }

    async fn delete(&self, id: &LeadId) -> Result<(), LeadStoreError> {
        let pairs = vec![("id".to_owned(), format!("eq.{id}"))];
        let response = self
            .request(reqwest::Method::DELETE, &pairs)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        // Deleting a missing row matches no filter and still succeeds.
        Ok(())
    }
}

/// Build the list query for a filter.
///
/// Always selects everything ordered newest-first; a status constraint adds
/// an equality pair and a search term adds a case-insensitive disjunction
/// over name and mobile.
pub fn filter_query_pairs(filter: &LeadFilter) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("select".to_owned(), "*".to_owned()),
        ("order".to_owned(), "created_at.desc".to_owned()),
    ];
    if let StatusFilter::Only(status) = filter.status {
        pairs.push(("status".to_owned(), format!("eq.{}", status.as_str())));
    }
    if let Some(term) = filter.search.as_deref() {
        let term = escape_search_term(term);
        if !term.is_empty() {
            pairs.push((
                "or".to_owned(),
                format!("(name.ilike.*{term}*,mobile.ilike.*{term}*)"),
            ));
        }
    }
    pairs
}

/// Strip characters that carry structure in the row API's filter grammar so
/// a search term can be embedded in an `ilike` pattern.
fn escape_search_term(term: &str) -> String {
    term.trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '(' | ')' | '*' | '%'))
        .collect()
}

fn map_transport_error(error: reqwest::Error) -> LeadStoreError {
    LeadStoreError::connection(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LeadStoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        LeadStoreError::connection(message)
    } else {
        LeadStoreError::query(message)
    }
}
