//! The backend patient search seam and its HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::types::{PatientCandidate, PatientPage};

/// Source of patient candidates for a query.
///
/// Implementations run a coarse full-text search and return one generous
/// page of rows; all relevance work happens in [`crate::rank`].
#[async_trait]
pub trait PatientSearchBackend: Send + Sync {
    async fn search_patients(&self, query: &str) -> Result<Vec<PatientCandidate>>;
}

/// Extract a human-readable message from a JSON error body.
///
/// Tries `error_description`, then `message`, then `error`, then falls back
/// to the raw body.
fn extract_error_description(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "message", "error"] {
            if let Some(desc) = json.get(key).and_then(|v| v.as_str()) {
                return desc.to_string();
            }
        }
    }
    body.to_string()
}

/// Client for the clinic backend's `/api/patients/search` endpoint.
#[derive(Debug, Clone)]
pub struct HttpPatientBackend {
    client: Client,
    config: SearchConfig,
}

impl HttpPatientBackend {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/api/patients/search?query={}&status={}&page=0&size={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            urlencoding::encode(&self.config.status),
            self.config.page_size
        )
    }

    /// Map a non-success response to `SearchError::Api`.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SearchError::Api {
            status: status.as_u16(),
            body: extract_error_description(&body),
        })
    }
}

#[async_trait]
impl PatientSearchBackend for HttpPatientBackend {
    async fn search_patients(&self, query: &str) -> Result<Vec<PatientCandidate>> {
        let url = self.search_url(query);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = self.check_response(response).await?;
        let body = response.text().await?;
        let page: PatientPage = serde_json::from_str(&body)?;

        debug!(query, rows = page.patients.len(), "Backend search returned");
        Ok(page.patients)
    }
}
