//! Review API client.
//!
//! One endpoint, one query parameter. Every failure is classified into an
//! `EndpointError`; retrying is left to the poll loop.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use homework_common::error::EndpointError;

/// Source of homework status updates.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch the decoded response for the window starting at `from_date`.
    async fn poll(&self, from_date: i64) -> Result<Value, EndpointError>;
}

/// HTTP client for the homework statuses endpoint.
#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(endpoint, token, Client::new())
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, TLS).
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, from_date: i64) -> Result<Value, EndpointError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(EndpointError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(classify_transport)?;
        serde_json::from_str(&body).map_err(|_| EndpointError::JsonConversion)
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn poll(&self, from_date: i64) -> Result<Value, EndpointError> {
        let result = self.fetch(from_date).await;

        if let Err(e) = &result {
            tracing::error!(
                from_date,
                status = ?bad_status(e),
                error = %e,
                "Homework API request failed"
            );
        }
        tracing::info!(from_date, ok = result.is_ok(), "Polled homework statuses endpoint");

        result
    }
}

/// Request-building problems are our bug; everything else is the network.
fn classify_transport(e: reqwest::Error) -> EndpointError {
    if e.is_builder() {
        EndpointError::Api(e.without_url().to_string())
    } else {
        EndpointError::Unavailable
    }
}

fn bad_status(e: &EndpointError) -> Option<u16> {
    match e {
        EndpointError::BadStatus { status } => Some(*status),
        _ => None,
    }
}
