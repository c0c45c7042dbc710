//! SQLite-backed store for attendance records awaiting sync.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use super::migrations;
use super::store::PendingStore;
use crate::error::StoreError;
use crate::sync::types::PendingAttendance;

/// Build a PendingAttendance from a database row.
fn row_to_pending(row: &rusqlite::Row) -> Result<PendingAttendance, rusqlite::Error> {
    Ok(PendingAttendance {
        id: row.get(0)?,
        enrollment_id: row.get(1)?,
        user_id: row.get(2)?,
        course_id: row.get(3)?,
        date: row.get(4)?,
        status: row.get(5)?,
        method: row.get(6)?,
        recorded_at: row.get(7)?,
    })
}

/// SQLite database holding the pending-attendance queue.
///
/// The store is shared machine-wide state: the CLI, a desktop shell, and
/// the sync agent may all open the same file. A busy timeout on the
/// connection covers the case where another process holds the write lock.
pub struct AttendanceDb {
    conn: Mutex<Connection>,
}

impl AttendanceDb {
    /// Open the store at `<data_dir>/rollcall.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("rollcall.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at a specific path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(StoreError::from)?;
        migrations::migrate(&conn).map_err(StoreError::Migration)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl PendingStore for AttendanceDb {
    fn put(&self, record: &PendingAttendance) -> Result<(), StoreError> {
        // INSERT OR REPLACE: a colliding id overwrites, like a keyed put
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn
            .execute(
                "INSERT OR REPLACE INTO pending_attendance
                 (id, enrollment_id, user_id, course_id, date, status, method, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.enrollment_id,
                    record.user_id,
                    record.course_id,
                    record.date,
                    record.status,
                    record.method,
                    record.recorded_at,
                ],
            )
            .map_err(|source| StoreError::Insert {
                id: record.id.clone(),
                source,
            })?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<PendingAttendance>, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let record = conn
            .query_row(
                "SELECT id, enrollment_id, user_id, course_id, date, status, method, recorded_at
                 FROM pending_attendance WHERE id = ?1",
                params![id],
                row_to_pending,
            )
            .optional()
            .map_err(StoreError::from)?;
        Ok(record)
    }

    fn list(&self) -> Result<Vec<PendingAttendance>, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn
            .prepare(
                "SELECT id, enrollment_id, user_id, course_id, date, status, method, recorded_at
                 FROM pending_attendance ORDER BY recorded_at, id",
            )
            .map_err(StoreError::from)?;

        let rows = stmt
            .query_map([], row_to_pending)
            .map_err(StoreError::from)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(StoreError::from)?);
        }
        Ok(records)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM pending_attendance", [], |row| {
                row.get(0)
            })
            .map_err(StoreError::from)?;
        Ok(count as usize)
    }
}
