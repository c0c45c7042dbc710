//! Offline attendance sync layer.
//!
//! Records marked while offline land in the durable pending store and a
//! background sync agent is nudged when one is available. Draining the
//! store belongs to the agent; this layer only enqueues and triggers.

pub mod agent_client;
pub mod installation_id;
pub mod pending_id;
pub mod queue;
pub mod trigger;
pub mod types;

#[cfg(test)]
mod agent_client_tests;

pub use agent_client::SyncAgentClient;
pub use installation_id::{
    get_or_create_installation_id, get_or_create_installation_id_at, InstallationIdError,
};
pub use queue::AttendanceQueue;
pub use trigger::SyncTrigger;
pub use types::{AttendanceDraft, DeliveryMode, PendingAttendance, QueueStatus, SyncError};
