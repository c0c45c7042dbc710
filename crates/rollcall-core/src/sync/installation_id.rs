// Installation ID management.
// Format: "rollcall-<uuid>"

use std::fs;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

const INSTALLATION_ID_FILE: &str = "installation_id.txt";
const INSTALLATION_ID_PREFIX: &str = "rollcall-";

/// Error type for installation ID operations
#[derive(Debug, thiserror::Error)]
pub enum InstallationIdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid installation ID format: {0}")]
    InvalidFormat(String),

    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Get or create the installation ID at the specified path.
/// Creates a new installation ID file if it doesn't exist.
///
/// The queue's durable store is shared by every process on the machine;
/// the installation ID is what lets the sync agent tell installs apart
/// when they register sync requests.
///
/// # Arguments
/// * `path` - Directory path where installation_id.txt is stored
///
/// # Returns
/// Installation ID string in format "rollcall-<uuid>"
pub fn get_or_create_installation_id_at(path: &Path) -> Result<String, InstallationIdError> {
    let id_path = path.join(INSTALLATION_ID_FILE);

    // Try to read existing installation ID
    if id_path.exists() {
        let content = fs::read_to_string(&id_path)?;
        let installation_id = content.trim().to_string();

        // Validate format
        if installation_id.starts_with(INSTALLATION_ID_PREFIX) {
            return Ok(installation_id);
        } else {
            return Err(InstallationIdError::InvalidFormat(installation_id));
        }
    }

    // Generate new installation ID
    let uuid = Uuid::new_v4().to_string();
    let installation_id = format!("{}{}", INSTALLATION_ID_PREFIX, uuid);

    // Ensure directory exists
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    // Write installation ID to file
    let mut file = fs::File::create(&id_path)?;
    writeln!(file, "{}", installation_id)?;

    Ok(installation_id)
}

/// Get or create the installation ID in the default data directory.
///
/// # Returns
/// Installation ID string in format "rollcall-<uuid>"
pub fn get_or_create_installation_id() -> Result<String, InstallationIdError> {
    let data_dir = crate::storage::data_dir()
        .map_err(|e| InstallationIdError::DataDir(e.to_string()))?;
    get_or_create_installation_id_at(&data_dir)
}
