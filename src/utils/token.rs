//! Session token generation.

use rand::RngCore;

/// Generate an opaque session token.
///
/// 32 bytes from the OS random source, hex-encoded: 256 bits of entropy in a
/// URL-safe form, well past what token guessing could cover.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
