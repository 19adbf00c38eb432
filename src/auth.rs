//! Login hash computation for the box's challenge-response handshake.
//!
//! The box never receives the shared key in clear text. Instead the client
//! asks for a one-time challenge and answers with two HMAC-SHA256 digests
//! keyed by that challenge:
//!
//! 1. `hash1` covers the administrative username (always `admin`)
//! 2. `hash2` covers the shared secret key (the box's WiFi key)
//!
//! Each branch hashes the SHA-256 *hex digest text* of its input, not the raw
//! bytes, and the final credential token is the plain string concatenation
//! `hash1 + hash2`. The box's firmware verifies exactly this construction;
//! hashing raw bytes, swapping the branches, or combining them any other way
//! is rejected as a bad credential.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Fixed administrative username expected by the box's login endpoint.
pub const ADMIN_USER: &str = "admin";

/// Computes the credential token for a login attempt.
///
/// # Arguments
/// * `challenge` - The one-time challenge string issued by the box
/// * `key` - The shared secret key (the box's WiFi key)
///
/// # Returns
/// The concatenation `hash1 + hash2` of the two hex-encoded HMAC digests,
/// ready to be submitted as the `hash` form field.
pub fn compute_login_hash(challenge: &str, key: &str) -> String {
    let hash1 = hmac_branch(challenge.as_bytes(), ADMIN_USER);
    let hash2 = hmac_branch(challenge.as_bytes(), key);
    hash1 + &hash2
}

/// One branch of the construction: HMAC-SHA256 keyed by the challenge over
/// the SHA-256 hex digest text of `input`.
fn hmac_branch(challenge: &[u8], input: &str) -> String {
    let inner = hex::encode(Sha256::digest(input.as_bytes()));

    // HMAC keys accept any length, so this cannot fail
    let mut mac = HmacSha256::new_from_slice(challenge)
        .expect("HMAC accepts keys of any length");
    mac.update(inner.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
