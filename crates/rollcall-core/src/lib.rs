//! # Rollcall Core Library
//!
//! This library provides the offline attendance plumbing for Rollcall.
//! Attendance marked while the network is down (or simply unreliable) is
//! written to a durable local queue first; delivery to the class-record
//! server happens later, driven by a background sync agent when one is
//! available and by the next application launch when one is not.
//!
//! ## Architecture
//!
//! - **Queue**: [`AttendanceQueue`] enriches caller records with a
//!   generated id and capture timestamp, persists them, and nudges the
//!   delivery agent on a best-effort basis
//! - **Storage**: SQLite-backed pending store behind the [`PendingStore`]
//!   trait, plus TOML-based configuration
//! - **Sync**: startup capability probing ([`SyncTrigger`]) and the HTTP
//!   client for the local sync agent
//!
//! Draining the queue (the actual POST of each record to the server and
//! its removal) belongs to the sync agent, not to this library.

pub mod error;
pub mod storage;
pub mod sync;

pub use error::{CoreError, StoreError};
pub use storage::{data_dir, AttendanceDb, Config, PendingStore, StoreConfig, SyncConfig};
pub use sync::{
    AttendanceDraft, AttendanceQueue, DeliveryMode, PendingAttendance, QueueStatus,
    SyncAgentClient, SyncError, SyncTrigger,
};
