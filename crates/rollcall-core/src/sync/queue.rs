//! The offline attendance queue.
//!
//! Records are made durable first and delivered later. Enqueue resolves
//! only once the store has acknowledged the insert; the delivery nudge
//! that follows is best-effort and never fails the call.

use chrono::Utc;
use log::{debug, warn};

use crate::error::CoreError;
use crate::storage::{AttendanceDb, Config, PendingStore};
use crate::sync::installation_id;
use crate::sync::pending_id;
use crate::sync::trigger::SyncTrigger;
use crate::sync::types::{AttendanceDraft, PendingAttendance, QueueStatus};

/// Durable queue for attendance records captured while offline.
pub struct AttendanceQueue {
    store: Box<dyn PendingStore>,
    trigger: SyncTrigger,
    tag: String,
}

impl AttendanceQueue {
    /// Open the queue with everything wired from configuration: the
    /// SQLite store at its configured path and the delivery trigger
    /// probed once, here.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or the store
    /// cannot be opened. An unreachable sync agent is not an error --
    /// the queue degrades to persist-only delivery.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;

        let store = match &config.store.path {
            Some(path) => AttendanceDb::open_at(path)?,
            None => AttendanceDb::open()?,
        };

        Ok(Self::assemble(Box::new(store), &config))
    }

    fn assemble(store: Box<dyn PendingStore>, config: &Config) -> Self {
        let installation_id = installation_id::get_or_create_installation_id()
            .unwrap_or_else(|e| {
                warn!("installation id unavailable, using anonymous: {e}");
                "rollcall-anonymous".to_string()
            });
        let trigger = SyncTrigger::detect(&config.sync, &installation_id);
        Self::with_parts(store, trigger, config.sync.tag.clone())
    }

    /// Build a queue from explicit parts. Tests and embedders inject
    /// their own store and trigger here.
    pub fn with_parts(store: Box<dyn PendingStore>, trigger: SyncTrigger, tag: String) -> Self {
        Self {
            store,
            trigger,
            tag,
        }
    }

    /// Persist an attendance record and nudge the delivery agent.
    ///
    /// The draft is enriched with a generated id and the capture
    /// timestamp, then written to the store. Only once the write is
    /// acknowledged does the trigger fire; a trigger failure is logged
    /// and swallowed, because the record is already safe on disk and
    /// the next launch will deliver it.
    ///
    /// No field of the draft is validated or altered.
    ///
    /// # Errors
    /// Returns an error if the store rejects the insert. In that case
    /// nothing was persisted and no sync was requested.
    pub fn enqueue(&self, draft: AttendanceDraft) -> Result<PendingAttendance, CoreError> {
        let recorded_at = Utc::now().timestamp_millis();
        let record = PendingAttendance {
            id: pending_id::generate(recorded_at),
            enrollment_id: draft.enrollment_id,
            user_id: draft.user_id,
            course_id: draft.course_id,
            date: draft.date,
            status: draft.status,
            method: draft.method,
            recorded_at,
        };

        self.store.put(&record)?;
        debug!("queued attendance {}", record.id);

        if let Err(e) = self.trigger.request(&self.tag) {
            warn!(
                "sync request for {} failed, record stays queued for next launch: {e}",
                record.id
            );
        }

        Ok(record)
    }

    /// All records awaiting delivery, oldest capture first.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn pending(&self) -> Result<Vec<PendingAttendance>, CoreError> {
        Ok(self.store.list()?)
    }

    /// Pending count plus the delivery mode selected at startup.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn status(&self) -> Result<QueueStatus, CoreError> {
        Ok(QueueStatus {
            pending_count: self.store.count()?,
            delivery: self.trigger.mode(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::sync::agent_client::SyncAgentClient;
    use crate::sync::types::DeliveryMode;
    use std::collections::HashSet;
    use std::time::Duration;

    fn sample_draft() -> AttendanceDraft {
        AttendanceDraft {
            enrollment_id: "e1".to_string(),
            user_id: "u1".to_string(),
            course_id: "c1".to_string(),
            date: "2024-05-01".to_string(),
            status: "present".to_string(),
            method: "qr".to_string(),
        }
    }

    fn persist_only_queue() -> AttendanceQueue {
        AttendanceQueue::with_parts(
            Box::new(AttendanceDb::open_memory().unwrap()),
            SyncTrigger::PersistOnly,
            "sync-attendance".to_string(),
        )
    }

    /// A store whose inserts always fail, for error-propagation tests.
    struct BrokenStore;

    impl PendingStore for BrokenStore {
        fn put(&self, _record: &PendingAttendance) -> Result<(), StoreError> {
            Err(StoreError::Locked)
        }
        fn get(&self, _id: &str) -> Result<Option<PendingAttendance>, StoreError> {
            Ok(None)
        }
        fn list(&self) -> Result<Vec<PendingAttendance>, StoreError> {
            Ok(Vec::new())
        }
        fn count(&self) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[test]
    fn test_enqueue_persists_exactly_one_enriched_record() {
        let queue = persist_only_queue();

        let record = queue.enqueue(sample_draft()).unwrap();

        assert!(pending_id::is_valid(&record.id));
        assert!(record.recorded_at > 0);
        assert_eq!(record.enrollment_id, "e1");
        assert_eq!(record.user_id, "u1");
        assert_eq!(record.course_id, "c1");
        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.status, "present");
        assert_eq!(record.method, "qr");

        let pending = queue.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0], record);
    }

    #[test]
    fn test_enqueue_rejects_when_store_fails() {
        let queue = AttendanceQueue::with_parts(
            Box::new(BrokenStore),
            SyncTrigger::PersistOnly,
            "sync-attendance".to_string(),
        );

        let result = queue.enqueue(sample_draft());
        assert!(matches!(
            result,
            Err(CoreError::Store(StoreError::Locked))
        ));
        assert_eq!(queue.status().unwrap().pending_count, 0);
    }

    #[test]
    fn test_sequential_enqueues_get_distinct_ids() {
        let queue = persist_only_queue();

        let mut ids = HashSet::new();
        for _ in 0..5 {
            let record = queue.enqueue(sample_draft()).unwrap();
            ids.insert(record.id);
        }

        assert_eq!(ids.len(), 5);
        assert_eq!(queue.pending().unwrap().len(), 5);
        assert_eq!(queue.status().unwrap().pending_count, 5);
    }

    #[test]
    fn test_enqueue_succeeds_without_background_capability() {
        let queue = persist_only_queue();

        let record = queue.enqueue(sample_draft()).unwrap();

        let status = queue.status().unwrap();
        assert_eq!(status.delivery, DeliveryMode::NextLaunch);
        assert_eq!(status.pending_count, 1);
        assert!(queue.pending().unwrap().iter().any(|r| r.id == record.id));
    }

    #[test]
    fn test_enqueue_swallows_sync_request_failure() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/sync/requests")
            .with_status(500)
            .create();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let client =
            SyncAgentClient::new(&server.url(), "rollcall-test", Duration::from_secs(2)).unwrap();
        let queue = AttendanceQueue::with_parts(
            Box::new(AttendanceDb::open_memory().unwrap()),
            SyncTrigger::Background(client),
            "sync-attendance".to_string(),
        );

        // The failed nudge must not fail the enqueue
        let record = queue.enqueue(sample_draft()).unwrap();
        assert_eq!(queue.pending().unwrap().len(), 1);
        assert_eq!(queue.pending().unwrap()[0].id, record.id);
    }

    #[test]
    fn test_enqueue_requests_sync_with_configured_tag() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/sync/requests")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "tag": "sync-attendance",
            })))
            .with_status(202)
            .create();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let _guard = rt.enter();

        let client =
            SyncAgentClient::new(&server.url(), "rollcall-test", Duration::from_secs(2)).unwrap();
        let queue = AttendanceQueue::with_parts(
            Box::new(AttendanceDb::open_memory().unwrap()),
            SyncTrigger::Background(client),
            "sync-attendance".to_string(),
        );

        queue.enqueue(sample_draft()).unwrap();
        mock.assert();

        let status = queue.status().unwrap();
        assert_eq!(status.delivery, DeliveryMode::Background);
    }

    #[test]
    fn test_enqueued_fields_are_not_validated() {
        let queue = persist_only_queue();

        let draft = AttendanceDraft {
            enrollment_id: String::new(),
            user_id: "u1".to_string(),
            course_id: "c1".to_string(),
            date: "not-a-date".to_string(),
            status: "banana".to_string(),
            method: String::new(),
        };

        let record = queue.enqueue(draft).unwrap();
        assert_eq!(record.date, "not-a-date");
        assert_eq!(record.status, "banana");
        assert_eq!(record.enrollment_id, "");
    }
}
