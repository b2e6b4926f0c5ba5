//! Segment encodings
//!
//! Header and payload segments use the URL-safe base64 alphabet with
//! canonical `=` padding and no line breaks. The signature segment is
//! lowercase hex.

use crate::error::{TokenError, TokenResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE};

/// Base64 URL-safe encoding with padding
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE.encode(input)
}

/// Base64 URL-safe decoding, padding required
///
/// # Errors
/// Returns [`TokenError::Encoding`] on characters outside the URL-safe
/// alphabet or missing/invalid padding.
#[inline]
pub fn decode(input: &str) -> TokenResult<Vec<u8>> {
    URL_SAFE
        .decode(input)
        .map_err(|e| TokenError::Encoding(format!("base64: {e}")))
}

/// Lowercase hex encoding
#[inline]
#[must_use]
pub fn to_hex(input: &[u8]) -> String {
    hex::encode(input)
}

/// Lowercase hex decoding
///
/// Only the spelling [`to_hex`] emits is accepted, so each signature has one
/// textual form.
///
/// # Errors
/// Returns [`TokenError::Encoding`] on odd length, uppercase digits or
/// non-hex characters.
pub fn from_hex(input: &str) -> TokenResult<Vec<u8>> {
    if input.bytes().any(|b| b.is_ascii_uppercase()) {
        return Err(TokenError::encoding("hex: uppercase digits"));
    }
    hex::decode(input).map_err(|e| TokenError::Encoding(format!("hex: {e}")))
}
