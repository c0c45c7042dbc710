//! HTTP client for the local sync agent.
//!
//! The agent is the process that actually drains the pending store and
//! POSTs records to the class-record server. This client only registers
//! interest: a health probe at startup and a named sync request after
//! every successful insert.
//!
//! Calls are driven through the ambient tokio runtime, so a runtime must
//! be entered before any method here is invoked.

use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use url::Url;

use crate::sync::types::SyncError;

/// Client for the sync agent's registration API.
pub struct SyncAgentClient {
    base_url: Url,
    installation_id: String,
    http: reqwest::Client,
}

impl SyncAgentClient {
    /// Create a new client for the agent at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        installation_id: &str,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            installation_id: installation_id.to_string(),
            http,
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check that the agent is up.
    ///
    /// # Errors
    /// Returns an error on a network failure or a non-success status.
    pub fn probe(&self) -> Result<(), SyncError> {
        let url = self.base_url.join("v1/health")?;

        let response = tokio::runtime::Handle::current()
            .block_on(async { self.http.get(url).send().await })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SyncError::AgentApi(format!(
                "health probe returned {}",
                response.status()
            )))
        }
    }

    /// Ask the agent to run a sync for `tag` once connectivity allows.
    ///
    /// The agent decides when to act on it; this call only records the
    /// request. The records themselves are never sent here -- the agent
    /// reads them straight from the shared store.
    ///
    /// # Errors
    /// Returns an error on a network failure or a non-success status.
    pub fn request_sync(&self, tag: &str) -> Result<(), SyncError> {
        let url = self.base_url.join("v1/sync/requests")?;
        let body = json!({
            "tag": tag,
            "installation_id": self.installation_id,
            "requested_at": Utc::now().to_rfc3339(),
        });

        let response = tokio::runtime::Handle::current()
            .block_on(async { self.http.post(url).json(&body).send().await })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SyncError::AgentApi(format!(
                "sync request returned {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = SyncAgentClient::new("not a url", "rollcall-test", Duration::from_secs(1));
        assert!(matches!(result, Err(SyncError::InvalidAgentUrl(_))));
    }

    #[test]
    fn test_new_keeps_base_url() {
        let client =
            SyncAgentClient::new("http://127.0.0.1:7878", "rollcall-test", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:7878/");
    }
}
