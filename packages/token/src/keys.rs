//! Key capabilities consumed by the builder and verifier.
//!
//! The crate never generates, stores or caches keys. Callers hand in an
//! object that can sign a digest or check a signature over one; P-256 ECDSA
//! keys from the `p256` crate implement both traits directly.

use crate::error::{TokenError, TokenResult};
use p256::{
    ecdsa::{
        Signature, SigningKey, VerifyingKey,
        signature::hazmat::{PrehashSigner, PrehashVerifier},
    },
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Something that can sign a precomputed digest.
///
/// Implementations must be thread-safe. Output may differ between calls for
/// the same digest if the scheme is randomized.
pub trait TokenSigningKey: Send + Sync {
    /// Sign `digest`, returning the encoded signature bytes.
    ///
    /// # Errors
    /// Returns [`TokenError::Signing`] if the key cannot produce a signature.
    fn sign_digest(&self, digest: &[u8]) -> TokenResult<Vec<u8>>;
}

/// Something that can check a signature over a precomputed digest.
pub trait TokenVerifyingKey: Send + Sync {
    /// True only if `signature` is a valid signature over `digest`.
    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> bool;
}

/// DER-encoded ECDSA P-256 signature over the digest (RFC 6979 nonces).
impl TokenSigningKey for SigningKey {
    fn sign_digest(&self, digest: &[u8]) -> TokenResult<Vec<u8>> {
        let signature: Signature = PrehashSigner::<Signature>::sign_prehash(self, digest)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

/// Expects a DER-encoded ECDSA P-256 signature; anything else fails.
impl TokenVerifyingKey for VerifyingKey {
    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_der(signature) else {
            return false;
        };
        PrehashVerifier::<Signature>::verify_prehash(self, digest, &signature).is_ok()
    }
}

impl<T: TokenSigningKey + ?Sized> TokenSigningKey for &T {
    fn sign_digest(&self, digest: &[u8]) -> TokenResult<Vec<u8>> {
        (**self).sign_digest(digest)
    }
}

impl<T: TokenSigningKey + ?Sized> TokenSigningKey for Arc<T> {
    fn sign_digest(&self, digest: &[u8]) -> TokenResult<Vec<u8>> {
        (**self).sign_digest(digest)
    }
}

impl<T: TokenVerifyingKey + ?Sized> TokenVerifyingKey for &T {
    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> bool {
        (**self).verify_digest(digest, signature)
    }
}

impl<T: TokenVerifyingKey + ?Sized> TokenVerifyingKey for Arc<T> {
    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> bool {
        (**self).verify_digest(digest, signature)
    }
}

/// Parse a P-256 private key from PKCS#8 PEM or a raw 32-byte scalar.
///
/// # Errors
/// Returns [`TokenError::InvalidKey`] if the bytes are neither.
pub fn signing_key_from_bytes(private_key: &[u8]) -> TokenResult<SigningKey> {
    if private_key.starts_with(b"-----BEGIN") {
        let pem = Zeroizing::new(
            std::str::from_utf8(private_key)
                .map_err(|_| TokenError::invalid_key("Invalid UTF-8 in private key"))?
                .to_string(),
        );
        return SigningKey::from_pkcs8_pem(&pem)
            .map_err(|_| TokenError::invalid_key("Invalid PKCS8 PEM private key"));
    }

    let scalar: Zeroizing<[u8; 32]> = Zeroizing::new(
        private_key
            .try_into()
            .map_err(|_| TokenError::invalid_key("Private key must be 32 bytes for P-256"))?,
    );
    SigningKey::from_slice(scalar.as_slice())
        .map_err(|_| TokenError::invalid_key("Invalid P-256 private key bytes"))
}

/// Parse a P-256 public key from SPKI PEM or SEC1 bytes (33 or 65 bytes).
///
/// # Errors
/// Returns [`TokenError::InvalidKey`] if the bytes are neither.
pub fn verifying_key_from_bytes(public_key: &[u8]) -> TokenResult<VerifyingKey> {
    if public_key.starts_with(b"-----BEGIN") {
        let pem = std::str::from_utf8(public_key)
            .map_err(|_| TokenError::invalid_key("Invalid UTF-8 in public key"))?;
        return VerifyingKey::from_public_key_pem(pem)
            .map_err(|_| TokenError::invalid_key("Invalid PEM public key"));
    }

    match public_key.len() {
        33 | 65 => VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|_| TokenError::invalid_key("Invalid SEC1 public key bytes")),
        _ => Err(TokenError::invalid_key(
            "Public key must be 33 or 65 bytes for P-256",
        )),
    }
}
