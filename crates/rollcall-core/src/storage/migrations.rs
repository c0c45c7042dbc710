//! Database schema migrations for the pending-attendance store.
//!
//! Migrations are versioned and applied automatically when opening the
//! store. The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Apply all pending migrations to bring the store to the current schema
/// version.
///
/// Safe to run on every open; a store that is already current is left
/// untouched.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    // Ensure schema_version table exists
    create_schema_version_table(conn)?;

    // Get current version
    let current_version = get_schema_version(conn);

    // Apply migrations sequentially
    if current_version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist.
fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the store.
///
/// Returns 0 if no version is set (fresh store).
pub(crate) fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT version FROM schema_version",
        [],
        |row| row.get::<_, i32>(0),
    )
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            log::warn!("failed to read schema_version, assuming fresh store: {e}");
        }
        0
    })
}

/// Set the schema version in the store.
fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    // Delete any existing version
    conn.execute("DELETE FROM schema_version", [])?;

    // Insert new version
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;

    Ok(())
}

/// Migration v1: pending attendance table.
///
/// One row per attendance record awaiting delivery, keyed by the generated
/// pending id. The sync agent deletes rows once the server acknowledges
/// them; nothing in this crate ever does.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS pending_attendance (
            id            TEXT PRIMARY KEY,
            enrollment_id TEXT NOT NULL,
            user_id       TEXT NOT NULL,
            course_id     TEXT NOT NULL,
            date          TEXT NOT NULL,
            status        TEXT NOT NULL,
            method        TEXT NOT NULL,
            recorded_at   INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_pending_attendance_recorded_at
            ON pending_attendance (recorded_at);",
    )?;

    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [1])?;

    tx.commit()?;
    Ok(())
}
