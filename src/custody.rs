//! Chain-of-custody hashing for evidence files.
//!
//! The backend computes a SHA-256 hexdigest for every stored file; this
//! module produces the same digest locally so a device copy can be
//! checked against the server record, not just displayed.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Digest prefix length shown in evidence lists.
const SHORT_HASH_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum CustodyError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of checking a local file against a recorded digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustodyCheck {
    Verified,
    Mismatch { expected: String, actual: String },
}

/// SHA-256 hexdigest of a byte buffer (lowercase, matching the backend).
pub fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 hexdigest of a file's contents.
pub fn hash_file(path: &Path) -> Result<String, CustodyError> {
    let content = std::fs::read(path)?;
    Ok(hash_bytes(&content))
}

/// Check a local file against the digest the backend recorded at upload.
pub fn verify_file(path: &Path, expected: &str) -> Result<CustodyCheck, CustodyError> {
    let actual = hash_file(path)?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(CustodyCheck::Verified)
    } else {
        Ok(CustodyCheck::Mismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Truncated digest for display next to an evidence row.
pub fn short_hash(hash: &str) -> String {
    if hash.len() <= SHORT_HASH_LEN {
        hash.to_string()
    } else {
        format!("{}…", &hash[..SHORT_HASH_LEN])
    }
}
