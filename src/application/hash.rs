//! Content hashing for change detection
//!
//! A hotel's fingerprint is the SHA-256 of its compact JSON snapshot. All
//! directories are ordered maps, so equal hotels always hash equally.

use sha2::{Digest, Sha256};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Hotel;

/// Lowercase hex SHA-256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Fingerprint of the whole hotel state.
pub fn hotel_hash(hotel: &Hotel) -> ApplicationResult<String> {
    let bytes = serde_json::to_vec(hotel).map_err(|source| ApplicationError::Snapshot {
        context: "serialize hotel for hashing".to_string(),
        source,
    })?;
    Ok(content_hash(&bytes))
}
