#![deny(unsafe_code)]

use std::path::Path;

use sha2::Digest;

use crate::error::{Result, StandardsError};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Fingerprint a standards file for provenance records.
pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    Ok(sha256_hex(&bytes))
}
