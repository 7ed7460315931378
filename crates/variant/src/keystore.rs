//! Keystore inspection
//!
//! Verifies that a referenced keystore file exists and computes its
//! SHA-256 fingerprint for signing reports.

use apkforge_core::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Facts about a keystore file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystoreInfo {
    /// Location of the keystore
    pub path: PathBuf,
    /// File size in bytes
    pub size_bytes: u64,
    /// SHA-256 fingerprint, colon-separated hex pairs
    pub sha256: String,
}

/// Inspect a keystore file, failing if it does not exist
pub fn inspect(path: &Path) -> Result<KeystoreInfo> {
    if !path.exists() {
        return Err(Error::keystore(path, "Keystore file does not exist"));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| Error::keystore(path, format!("Failed to read keystore: {}", e)))?;

    Ok(KeystoreInfo {
        path: path.to_path_buf(),
        size_bytes: bytes.len() as u64,
        sha256: fingerprint_bytes(&bytes),
    })
}

/// SHA-256 fingerprint in the `AA:BB:...` form keytool prints
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode_upper(digest)
        .as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(":")
}
