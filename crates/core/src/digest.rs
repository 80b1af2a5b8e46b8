//! Secret digests.
//!
//! A single unsalted SHA-256, rendered as lowercase hex. This matches what the
//! extension has always stored, so existing records keep verifying.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `secret`.
pub fn digest_secret(secret: &str) -> String {
	hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Returns `true` when `candidate` hashes to `stored`.
pub fn matches(candidate: &str, stored: Option<&str>) -> bool {
	stored.is_some_and(|stored| digest_secret(candidate) == stored)
}
