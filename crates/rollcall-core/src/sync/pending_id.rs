// Pending-record key generation.
// Format: "pending-<millis>-<alphanumeric suffix>"

use rand::distributions::Alphanumeric;
use rand::Rng;

const PENDING_ID_PREFIX: &str = "pending-";
const SUFFIX_LEN: usize = 9;

/// Generate a store key for a record captured at `recorded_at_ms`.
///
/// Uniqueness is probabilistic: the timestamp plus a random 9-character
/// suffix. Two identical keys would overwrite each other in the store,
/// so the suffix keeps same-millisecond captures apart.
pub fn generate(recorded_at_ms: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{PENDING_ID_PREFIX}{recorded_at_ms}-{suffix}")
}

/// Whether a string looks like a generated pending id
/// (`pending-<digits>-<alnum>`).
pub fn is_valid(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(PENDING_ID_PREFIX) else {
        return false;
    };
    let Some((millis, suffix)) = rest.split_once('-') else {
        return false;
    };
    !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_alphanumeric())
}
