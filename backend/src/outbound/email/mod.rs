//! Reqwest-backed adapter for the Resend email delivery API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::domain::ports::{EmailMessage, Mailer, MailerError};
use crate::outbound::body_preview;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Send payload accepted by the delivery API.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

impl<'a> SendRequest<'a> {
    fn from_message(message: &'a EmailMessage) -> Self {
        Self {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        }
    }
}

/// Mailer adapter submitting sends to the Resend HTTP API.
pub struct ResendMailer {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl ResendMailer {
    /// Build a mailer against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let endpoint = Url::parse(RESEND_ENDPOINT).unwrap_or_else(|_| {
            unreachable!("the production endpoint constant is a valid URL")
        });
        Self::with_endpoint(endpoint, api_key)
    }

    /// Build a mailer against an explicit endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_endpoint(endpoint: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&SendRequest::from_message(message))
            .send()
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;
        Err(MailerError::rejected(
            status.as_u16(),
            body_preview(body.as_ref()),
        ))
    }
}
