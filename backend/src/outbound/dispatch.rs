//! HTTP adapter invoking a remotely deployed notification dispatcher.
//!
//! Deployments that run the dispatcher as a separate serverless function
//! use this notifier instead of the in-process service. The wire envelope
//! is `{ "leadId": "<uuid>" }` out and `{ "success": true, "message": ... }`
//! or `{ "error": ... }` back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{DispatchOutcome, LeadNotifier};
use crate::domain::{Error, LeadId};
use crate::outbound::body_preview;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotifyRequest {
    lead_id: LeadId,
}

#[derive(Debug, Deserialize)]
struct NotifySuccess {
    message: String,
}

#[derive(Debug, Deserialize)]
struct NotifyFailure {
    error: String,
}

/// Notifier that POSTs the lead identifier to a dispatcher endpoint.
pub struct HttpLeadNotifier {
    client: Client,
    endpoint: Url,
    bearer_token: Option<String>,
}

impl HttpLeadNotifier {
    /// Build a notifier for one dispatcher endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, bearer_token: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            bearer_token,
        })
    }
}

#[async_trait]
impl LeadNotifier for HttpLeadNotifier {
    async fn notify_new_lead(&self, lead_id: LeadId) -> Result<DispatchOutcome, Error> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&NotifyRequest { lead_id });
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|err| Error::service_unavailable(format!("dispatcher unreachable: {err}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| Error::service_unavailable(format!("dispatcher unreachable: {err}")))?;
        if status.is_success() {
            return Ok(decode_outcome(body.as_ref()));
        }
        Err(decode_failure(status, body.as_ref()))
    }
}

fn decode_outcome(body: &[u8]) -> DispatchOutcome {
    let Ok(envelope) = serde_json::from_slice::<NotifySuccess>(body) else {
        // A 2xx with an undecodable body still means the dispatch was
        // handled; assume the email went out.
        return DispatchOutcome::Sent;
    };
    if envelope.message == DispatchOutcome::Skipped.message() {
        DispatchOutcome::Skipped
    } else {
        DispatchOutcome::Sent
    }
}

fn decode_failure(status: StatusCode, body: &[u8]) -> Error {
    if let Ok(envelope) = serde_json::from_slice::<NotifyFailure>(body) {
        if status == StatusCode::NOT_FOUND {
            return Error::not_found(envelope.error);
        }
        return Error::internal(envelope.error);
    }
    Error::internal(format!(
        "dispatcher failed: status {}: {}",
        status.as_u16(),
        body_preview(body)
    ))
}
