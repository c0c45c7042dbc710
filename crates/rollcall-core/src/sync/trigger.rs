//! Delivery-trigger capability, selected once at startup.
//!
//! The platform either offers a background sync agent or it doesn't.
//! Probing happens exactly once, here; afterwards the selected trigger
//! is simply asked for a sync.

use std::time::Duration;

use log::warn;

use crate::storage::SyncConfig;
use crate::sync::agent_client::SyncAgentClient;
use crate::sync::types::{DeliveryMode, SyncError};

/// The delivery capability the queue was started with.
pub enum SyncTrigger {
    /// An agent answered the startup probe. Nudge it after every insert.
    Background(SyncAgentClient),
    /// No agent configured or reachable. Records stay in the store until
    /// the next launch drains them.
    PersistOnly,
}

impl SyncTrigger {
    /// Probe the configured agent and pick the capability.
    ///
    /// Any failure here -- no URL, a bad URL, an unreachable or unhealthy
    /// agent -- degrades to [`SyncTrigger::PersistOnly`]. Startup never
    /// fails because of the agent.
    pub fn detect(config: &SyncConfig, installation_id: &str) -> Self {
        let Some(agent_url) = &config.agent_url else {
            return SyncTrigger::PersistOnly;
        };

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = match SyncAgentClient::new(agent_url, installation_id, timeout) {
            Ok(client) => client,
            Err(e) => {
                warn!("sync agent misconfigured, falling back to persist-only: {e}");
                return SyncTrigger::PersistOnly;
            }
        };

        match client.probe() {
            Ok(()) => SyncTrigger::Background(client),
            Err(e) => {
                warn!("sync agent not reachable, falling back to persist-only: {e}");
                SyncTrigger::PersistOnly
            }
        }
    }

    /// Request a background sync for `tag`.
    ///
    /// Persist-only mode has nothing to request and reports success.
    ///
    /// # Errors
    /// Returns an error if the agent rejects the request or cannot be
    /// reached. Callers that have already persisted their record are
    /// expected to swallow this.
    pub fn request(&self, tag: &str) -> Result<(), SyncError> {
        match self {
            SyncTrigger::Background(client) => client.request_sync(tag),
            SyncTrigger::PersistOnly => Ok(()),
        }
    }

    /// Delivery mode this trigger provides.
    pub fn mode(&self) -> DeliveryMode {
        match self {
            SyncTrigger::Background(_) => DeliveryMode::Background,
            SyncTrigger::PersistOnly => DeliveryMode::NextLaunch,
        }
    }
}
