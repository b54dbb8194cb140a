//! WaniKani API client
//!
//! Wraps the two upstream calls the proxy needs: review statistics below the
//! critical threshold, and subject details for a batch of IDs. Every call makes
//! exactly one request and never retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{ReviewStatistics, Subject, SubjectId, Subjects};

/// Base URL for the WaniKani v2 API
pub const WANIKANI_API_URL: &str = "https://api.wanikani.com/v2";

/// Items answered correctly less often than this percentage are critical
pub const CRITICAL_ITEM_PERCENTAGE: u8 = 75;

const STATISTICS_ENDPOINT: &str = "/review_statistics";
const SUBJECTS_ENDPOINT: &str = "/subjects";

/// Errors that can occur when talking to the WaniKani API
#[derive(Debug, Error)]
pub enum WaniKaniError {
    /// HTTP request failed before a response was read
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl WaniKaniError {
    /// Whether the request gave up waiting on the API
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaniKaniError::HttpError(e) if e.is_timeout())
    }
}

/// Client for the WaniKani API
#[derive(Debug, Clone)]
pub struct WaniKaniClient {
    client: Client,
    base_url: String,
}

impl WaniKaniClient {
    /// Create a client against `base_url` whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WaniKaniError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client from an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch review statistics for items below the critical percentage
    ///
    /// # Arguments
    /// * `token` - WaniKani API token of the user, passed through as a bearer token
    pub async fn fetch_critical_review_statistics(
        &self,
        token: &str,
    ) -> Result<ReviewStatistics, WaniKaniError> {
        let threshold = CRITICAL_ITEM_PERCENTAGE.to_string();
        self.get_json(
            STATISTICS_ENDPOINT,
            token,
            &[("percentages_less_than", threshold.as_str())],
        )
        .await
    }

    /// Fetch the subject IDs of all critical items, in API order
    pub async fn fetch_critical_subject_ids(
        &self,
        token: &str,
    ) -> Result<Vec<SubjectId>, WaniKaniError> {
        let statistics = self.fetch_critical_review_statistics(token).await?;
        Ok(statistics.subject_ids())
    }

    /// Fetch subject details for `ids` in a single request
    ///
    /// The API returns each subject once, in its own order, regardless of
    /// duplicates or ordering in `ids`.
    pub async fn fetch_subjects(
        &self,
        token: &str,
        ids: &[SubjectId],
    ) -> Result<Vec<Subject>, WaniKaniError> {
        let ids = join_ids(ids, ",");
        let subjects: Subjects = self
            .get_json(SUBJECTS_ENDPOINT, token, &[("ids", ids.as_str())])
            .await?;
        Ok(subjects.data)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WaniKaniError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        // Read the body either way so the connection can be reused
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(endpoint, %status, "WaniKani API returned an error status");
            return Err(WaniKaniError::Status { endpoint, status });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Joins subject IDs with `delimiter`
fn join_ids(ids: &[SubjectId], delimiter: &str) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(delimiter)
}
