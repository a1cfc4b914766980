//! Password gate
//!
//! A SHA-256 comparison against a configured hex digest. It keeps casual
//! visitors out of the UI and nothing more.

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
  #[error("Password gate is not configured; set GOLF_TRACKER_PASSWORD_SHA256")]
  NotConfigured,
  #[error("Incorrect password")]
  Rejected,
}

pub fn sha256_hex(input: &str) -> String {
  hex::encode(Sha256::digest(input.as_bytes()))
}

/// Check `password` against the expected lowercase hex digest
pub fn verify_password(expected_sha256: Option<&str>, password: &str) -> Result<(), GateError> {
  let expected = expected_sha256.ok_or(GateError::NotConfigured)?;
  if sha256_hex(password) == expected.to_lowercase() {
    Ok(())
  } else {
    Err(GateError::Rejected)
  }
}
