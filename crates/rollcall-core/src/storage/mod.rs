mod config;
pub mod migrations;
pub mod pending_db;
pub mod store;

pub use config::{Config, StoreConfig, SyncConfig};
pub use pending_db::AttendanceDb;
pub use store::PendingStore;

use std::path::PathBuf;

/// Returns `~/.config/rollcall[-dev]/` based on ROLLCALL_ENV.
///
/// Set ROLLCALL_ENV=dev to use the development data directory, or
/// ROLLCALL_DATA_DIR to point somewhere else entirely (tests do this).
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(dir) = std::env::var("ROLLCALL_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ROLLCALL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rollcall-dev")
    } else {
        base_dir.join("rollcall")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
