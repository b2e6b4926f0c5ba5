//! Token issuance

use crate::{
    claims::Claims,
    codec,
    config::TokenConfig,
    content,
    error::TokenResult,
    header::Header,
    keys::TokenSigningKey,
    token::Token,
};
use digest::Digest;
use sha2::Sha256;
use std::marker::PhantomData;

/// Builds signed tokens under one [`TokenConfig`].
///
/// The builder holds no key material; the signing key is supplied per call.
/// `H` is the digest applied to the signed content before signing.
pub struct TokenBuilder<H = Sha256> {
    config: TokenConfig,
    _digest: PhantomData<fn() -> H>,
}

impl TokenBuilder {
    /// Builder using SHA-256 digests.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        Self::with_digest(config)
    }
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new(TokenConfig::global().clone())
    }
}

impl<H> Clone for TokenBuilder<H> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            _digest: PhantomData,
        }
    }
}

impl<H: Digest> TokenBuilder<H> {
    /// Builder with an explicit digest type.
    #[must_use]
    pub fn with_digest(config: TokenConfig) -> Self {
        Self {
            config,
            _digest: PhantomData,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Sign `claims` under the configured default header.
    ///
    /// # Errors
    /// [`TokenError::Serialization`](crate::TokenError::Serialization) if the
    /// header or claims cannot be encoded, [`TokenError::Signing`](crate::TokenError::Signing)
    /// if the key fails to sign.
    pub fn build<K>(&self, claims: &Claims, key: &K) -> TokenResult<Token>
    where
        K: TokenSigningKey + ?Sized,
    {
        self.build_with_header(claims, key, &self.config.default_header())
    }

    /// Sign `claims` under an explicit header.
    ///
    /// # Errors
    /// As [`build`](Self::build); a header with an empty identifier is a
    /// serialization error.
    pub fn build_with_header<K>(&self, claims: &Claims, key: &K, header: &Header) -> TokenResult<Token>
    where
        K: TokenSigningKey + ?Sized,
    {
        let header_segment = codec::encode(&header.to_json()?);
        let payload_segment = codec::encode(&claims.to_json()?);

        let signed = content::assemble(&header_segment, &payload_segment);
        let digest = content::hash_content::<H>(&signed);

        let signature = key.sign_digest(&digest).inspect_err(|e| {
            tracing::warn!(kind = e.kind().as_str(), "token signing failed");
        })?;

        let token = Token::from_parts(&signed, &codec::to_hex(&signature))?;
        tracing::trace!(claims = claims.len(), alg = %header.alg, "token built");
        Ok(token)
    }
}

/// Build a token under the process-wide [`TokenConfig::global`] configuration.
///
/// # Errors
/// See [`TokenBuilder::build`].
pub fn build_token<K>(claims: &Claims, key: &K) -> TokenResult<Token>
where
    K: TokenSigningKey + ?Sized,
{
    TokenBuilder::default().build(claims, key)
}
