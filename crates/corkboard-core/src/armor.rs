//! Text armor for ciphertexts and secrets.
//!
//! Standard base64 alphabet with padding. Surrounding whitespace is ignored
//! on decode so that values pasted from a terminal round-trip.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::Error;

/// Encode bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64.
///
/// # Errors
///
/// - `Decode`: not valid base64
pub fn decode(text: &str) -> Result<Vec<u8>, Error> {
    Ok(STANDARD.decode(text.trim())?)
}
