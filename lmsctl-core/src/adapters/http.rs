//! LMS HTTP client
//!
//! Sends the account mutations to the LMS backend:
//! - `PUT {base}/user/update` with `{name, oldPassword, newPassword}`
//! - `DELETE {base}/user/delete` with no body
//!
//! Both authenticate with `Authorization: Bearer <token>` and answer with
//! `{success, message?}`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::config::Config;
use crate::domain::{MutationResponse, SessionCredential, TransportError, UpdateProfileRequest};
use crate::ports::MutationTransport;

/// reqwest-backed [`MutationTransport`]
#[derive(Debug, Clone)]
pub struct HttpMutationTransport {
    client: Client,
    update_url: String,
    delete_url: String,
}

impl HttpMutationTransport {
    /// Build a transport from the resolved configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_urls(
            &config.update_user_url(),
            &config.delete_account_url(),
            config.request_timeout,
        )
    }

    pub fn with_urls(update_url: &str, delete_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            update_url: update_url.to_string(),
            delete_url: delete_url.to_string(),
        })
    }

    /// Send a request and decode the body.
    ///
    /// `empty_body` is returned when a 2xx response has no content.
    async fn send(
        &self,
        request: RequestBuilder,
        empty_body: MutationResponse,
    ) -> std::result::Result<MutationResponse, TransportError> {
        let response = request.send().await.map_err(map_request_error)?;
        check_response_status(&response)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(empty_body);
        }

        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MutationTransport for HttpMutationTransport {
    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
        credential: &SessionCredential,
    ) -> std::result::Result<MutationResponse, TransportError> {
        let builder = self
            .client
            .put(&self.update_url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer())
            .json(request);

        // An empty body carries no success flag
        self.send(builder, MutationResponse::default()).await
    }

    async fn delete_account(
        &self,
        credential: &SessionCredential,
    ) -> std::result::Result<MutationResponse, TransportError> {
        let builder = self
            .client
            .delete(&self.delete_url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer());

        // 204 No Content means the account is gone
        self.send(builder, MutationResponse::ok()).await
    }
}

/// Map request errors to transport error kinds
fn map_request_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect
    } else if let Some(status) = error.status() {
        status_error(status.as_u16()).unwrap_or(TransportError::Status {
            status: status.as_u16(),
        })
    } else {
        TransportError::Request(error.to_string())
    }
}

fn check_response_status(response: &Response) -> std::result::Result<(), TransportError> {
    match status_error(response.status().as_u16()) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Error for a non-success HTTP status; 401 and 403 mark an authorization failure
fn status_error(status: u16) -> Option<TransportError> {
    match status {
        200..=299 => None,
        401 | 403 => Some(TransportError::Forbidden { status }),
        _ => Some(TransportError::Status { status }),
    }
}
