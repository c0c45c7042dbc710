//! Core types for the offline attendance queue.

use serde::{Deserialize, Serialize};

/// An attendance record as the caller hands it over, before the queue
/// enriches it. Every field is an opaque string owned by the caller;
/// nothing here is validated -- malformed data is persisted as-is and
/// it is the server's job to reject it on delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDraft {
    /// Enrollment the attendance applies to.
    pub enrollment_id: String,
    /// User being marked.
    pub user_id: String,
    /// Course the enrollment belongs to.
    pub course_id: String,
    /// Calendar date of the attendance, caller-supplied format.
    pub date: String,
    /// Attendance outcome (e.g. present, absent, late).
    pub status: String,
    /// How the attendance was captured (e.g. "qr", "manual").
    pub method: String,
}

/// An attendance record persisted in the pending store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttendance {
    /// Generated store key, `pending-<millis>-<suffix>`.
    pub id: String,
    pub enrollment_id: String,
    pub user_id: String,
    pub course_id: String,
    pub date: String,
    pub status: String,
    pub method: String,
    /// Capture time, milliseconds since epoch. Used for ordering and
    /// debugging, never for conflict resolution.
    pub recorded_at: i64,
}

/// How queued records will reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// A sync agent answered the startup probe; it is nudged after every
    /// successful insert.
    Background,
    /// No agent available; records wait for the next application launch.
    NextLaunch,
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMode::Background => write!(f, "background sync"),
            DeliveryMode::NextLaunch => write!(f, "deferred until next launch"),
        }
    }
}

/// Current queue status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    /// Number of records awaiting delivery.
    pub pending_count: usize,
    /// Delivery mode selected at startup.
    pub delivery: DeliveryMode,
}

/// Sync-trigger error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Sync agent error: {0}")]
    AgentApi(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid agent URL: {0}")]
    InvalidAgentUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_attendance_json_shape() {
        let record = PendingAttendance {
            id: "pending-1700000000000-a1b2c3d4e".to_string(),
            enrollment_id: "e1".to_string(),
            user_id: "u1".to_string(),
            course_id: "c1".to_string(),
            date: "2024-05-01".to_string(),
            status: "present".to_string(),
            method: "qr".to_string(),
            recorded_at: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "pending-1700000000000-a1b2c3d4e");
        assert_eq!(json["enrollment_id"], "e1");
        assert_eq!(json["recorded_at"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_delivery_mode_serde_tag() {
        assert_eq!(
            serde_json::to_value(DeliveryMode::Background).unwrap(),
            "background"
        );
        assert_eq!(
            serde_json::to_value(DeliveryMode::NextLaunch).unwrap(),
            "next_launch"
        );
    }

    #[test]
    fn test_draft_accepts_arbitrary_strings() {
        // The queue never validates caller fields
        let draft = AttendanceDraft {
            enrollment_id: String::new(),
            user_id: "not a uuid".to_string(),
            course_id: "💾".to_string(),
            date: "sometime".to_string(),
            status: "unheard-of".to_string(),
            method: String::new(),
        };
        let json = serde_json::to_string(&draft).unwrap();
        let back: AttendanceDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
