//! Token verification
//!
//! Stages run in a fixed order and the first failure aborts the call:
//! split, signature over the raw segments, header identifiers, claims, expiry.
//! Nothing from the header or payload is decoded before the signature holds.

use crate::{
    claims::Claims,
    codec,
    config::TokenConfig,
    content,
    error::{TokenError, TokenResult},
    expiry::ExpiryPolicy,
    header::Header,
    keys::TokenVerifyingKey,
    token::TokenSegments,
};
use chrono::{DateTime, Utc};
use digest::Digest;
use sha2::Sha256;
use std::marker::PhantomData;

/// Verifies tokens against the identifiers and leeway of one [`TokenConfig`].
pub struct TokenVerifier<H = Sha256> {
    config: TokenConfig,
    expiry: ExpiryPolicy,
    _digest: PhantomData<fn() -> H>,
}

impl TokenVerifier {
    /// Verifier using SHA-256 digests.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        Self::with_digest(config)
    }
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self::new(TokenConfig::global().clone())
    }
}

impl<H> Clone for TokenVerifier<H> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            expiry: self.expiry,
            _digest: PhantomData,
        }
    }
}

impl<H: Digest> TokenVerifier<H> {
    /// Verifier with an explicit digest type.
    #[must_use]
    pub fn with_digest(config: TokenConfig) -> Self {
        let expiry = ExpiryPolicy::new(config.leeway());
        Self {
            config,
            expiry,
            _digest: PhantomData,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Verify `token` and return its claims, checking expiry against the
    /// system clock.
    ///
    /// # Errors
    /// Any [`TokenError`] rejection; see [`verify_at`](Self::verify_at).
    pub fn verify<K>(&self, token: &str, key: &K) -> TokenResult<Claims>
    where
        K: TokenVerifyingKey + ?Sized,
    {
        self.verify_at(token, key, Utc::now())
    }

    /// Verify `token` with `now` as the current time.
    ///
    /// # Errors
    /// - [`TokenError::Format`]: not three non-empty segments, or bad `exp`
    /// - [`TokenError::Encoding`]: segment is not valid hex/base64
    /// - [`TokenError::Signature`]: signature does not verify under `key`
    /// - [`TokenError::AlgorithmMismatch`]: header identifiers differ from config
    /// - [`TokenError::Serialization`]: header or claims JSON malformed
    /// - [`TokenError::Expired`]: `exp` has passed
    pub fn verify_at<K>(&self, token: &str, key: &K, now: DateTime<Utc>) -> TokenResult<Claims>
    where
        K: TokenVerifyingKey + ?Sized,
    {
        let claims = self.run(token, key, now).inspect_err(log_rejection)?;
        tracing::trace!(claims = claims.len(), "token verified");
        Ok(claims)
    }

    fn run<K>(&self, token: &str, key: &K, now: DateTime<Utc>) -> TokenResult<Claims>
    where
        K: TokenVerifyingKey + ?Sized,
    {
        let segments = TokenSegments::split(token)?;

        // Hash the segments exactly as received.
        let signed = content::assemble(segments.header, segments.payload);
        let signature = codec::from_hex(segments.signature)?;
        let digest = content::hash_content::<H>(&signed);
        if !key.verify_digest(&digest, &signature) {
            return Err(TokenError::Signature);
        }

        let header = Header::from_json(&codec::decode(segments.header)?)?;
        if !header.matches(&self.config.algorithm, &self.config.token_type) {
            return Err(TokenError::algorithm_mismatch(
                (self.config.algorithm.as_str(), self.config.token_type.as_str()),
                (header.alg.as_str(), header.typ.as_str()),
            ));
        }

        let claims = Claims::from_json(&codec::decode(segments.payload)?)?;
        self.expiry.check(&claims, now)?;
        Ok(claims)
    }
}

fn log_rejection(err: &TokenError) {
    match err {
        TokenError::Signature | TokenError::AlgorithmMismatch { .. } => {
            tracing::warn!(kind = err.kind().as_str(), error = %err, "token rejected");
        }
        _ => {
            tracing::debug!(kind = err.kind().as_str(), error = %err, "token rejected");
        }
    }
}

/// Verify a token under the process-wide [`TokenConfig::global`] configuration.
///
/// # Errors
/// See [`TokenVerifier::verify_at`].
pub fn verify_token<K>(token: &str, key: &K) -> TokenResult<Claims>
where
    K: TokenVerifyingKey + ?Sized,
{
    TokenVerifier::default().verify(token, key)
}
