//! HTTP client for the external jobs API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::models::ExternalJobTuple;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("External jobs API unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("External jobs API answered with status {0}")]
    BadStatus(StatusCode),

    #[error("External jobs API sent an unexpected payload: {0}")]
    BadPayload(String),
}

/// A live source of external job postings.
#[async_trait]
pub trait ExternalJobSource: Send + Sync {
    /// Fetches every posting, in the order the source returns them.
    async fn fetch_jobs(&self) -> Result<Vec<ExternalJobTuple>, SourceError>;
}

pub struct HttpExternalJobSource {
    client: reqwest::Client,
    url: String,
}

impl HttpExternalJobSource {
    /// Create a client for the jobs list at `url`.
    ///
    /// # Arguments
    /// * `url` - Full URL of the jobs list (e.g., "http://localhost:8080/jobs")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(url: String, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        let url = url.trim_end_matches('/').to_string();

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExternalJobSource for HttpExternalJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<ExternalJobTuple>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(SourceError::Unreachable)?;

        if !response.status().is_success() {
            return Err(SourceError::BadStatus(response.status()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| SourceError::BadPayload(err.to_string()))?;
        let Value::Array(records) = body else {
            return Err(SourceError::BadPayload(
                "expected an array of job records".to_string(),
            ));
        };

        debug!("Fetched {} external jobs from {}", records.len(), self.url);
        Ok(records.iter().map(ExternalJobTuple::parse_lenient).collect())
    }
}
