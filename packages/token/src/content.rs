//! Signed content framing
//!
//! The signed content is the two encoded segments joined by a single `.`,
//! exactly as they appear on the wire. Both the build and the verify path
//! hash these bytes; the verify path never re-encodes decoded values.

use digest::Digest;

/// Join already-encoded header and payload segments into signing input.
#[must_use]
pub fn assemble(header_segment: &str, payload_segment: &str) -> Vec<u8> {
    let mut content = Vec::with_capacity(header_segment.len() + 1 + payload_segment.len());
    content.extend_from_slice(header_segment.as_bytes());
    content.push(b'.');
    content.extend_from_slice(payload_segment.as_bytes());
    content
}

/// Fixed-length digest of the signing input
#[inline]
#[must_use]
pub fn hash_content<H: Digest>(content: &[u8]) -> Vec<u8> {
    H::digest(content).to_vec()
}
