//! HTTP client for the document status endpoint.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::Settings;
use crate::error::StatusError;
use crate::models::DocumentStatus;

/// Client for `GET /api/document/{id}/status`.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    endpoint: String,
}

impl StatusClient {
    /// Create a client for the API at `settings.endpoint`.
    pub fn new(settings: &Settings) -> Result<Self, StatusError> {
        // A bad endpoint fails construction, not every poll.
        Url::parse(&settings.endpoint)
            .map_err(|e| StatusError::InvalidEndpoint(settings.endpoint.clone(), e))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout))
            .user_agent(settings.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// The API base URL this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the current processing status for a document.
    ///
    /// A non-2xx response is a transport failure, not a status.
    pub async fn fetch_status(&self, document_id: i64) -> Result<DocumentStatus, StatusError> {
        let url = format!("{}/api/document/{}/status", self.endpoint, document_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StatusError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StatusError::Http(resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| StatusError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_endpoint() {
        let settings = Settings::with_endpoint("not a url");
        assert!(matches!(
            StatusClient::new(&settings),
            Err(StatusError::InvalidEndpoint(..))
        ));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let settings = Settings::with_endpoint("http://localhost:5000/");
        let client = StatusClient::new(&settings).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000");
    }
}
