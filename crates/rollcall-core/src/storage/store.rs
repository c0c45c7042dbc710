use crate::error::StoreError;
use crate::sync::types::PendingAttendance;

/// Keyed durable storage for attendance records awaiting delivery.
/// The queue never opens a connection of its own -- whoever constructs
/// the queue owns the store's lifecycle.
pub trait PendingStore: Send + Sync {
    /// Insert a record under its id. A colliding id overwrites the
    /// previous entry (last write wins).
    fn put(&self, record: &PendingAttendance) -> Result<(), StoreError>;

    /// Fetch a single record by id.
    fn get(&self, id: &str) -> Result<Option<PendingAttendance>, StoreError>;

    /// All pending records, oldest capture first.
    fn list(&self) -> Result<Vec<PendingAttendance>, StoreError>;

    /// Number of pending records.
    fn count(&self) -> Result<usize, StoreError>;
}
