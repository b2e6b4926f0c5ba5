//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Message handed to untrusted parties for any verify-path failure.
pub const PUBLIC_VERIFY_MESSAGE: &str = "invalid token";

/// Token error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Structural violation: wrong segment count, empty segment, unparsable expiry
    #[error("Malformed token: {0}")]
    Format(String),
    /// Base64 or hex decoding failed
    #[error("Encoding error: {0}")]
    Encoding(String),
    /// Header or claims JSON could not be produced or parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Signature did not verify against the supplied key
    #[error("Invalid token signature")]
    Signature,
    /// Header identifiers disagree with what the verifier expects
    #[error("Unexpected token header: expected {expected}, found {found}")]
    AlgorithmMismatch {
        /// Identifiers the verifier was configured with, as `alg/typ`
        expected: String,
        /// Identifiers carried by the token, as `alg/typ`
        found: String,
    },
    /// Token is valid but past its `exp` claim
    #[error("Token has expired")]
    Expired,
    /// Signing operation failed while building a token
    #[error("Signing error: {0}")]
    Signing(String),
    /// Key bytes could not be turned into a signing or verifying key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Configuration value rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Background task failed
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fieldless discriminant of [`TokenError`] for matching and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
    /// See [`TokenError::Format`]
    Format,
    /// See [`TokenError::Encoding`]
    Encoding,
    /// See [`TokenError::Serialization`]
    Serialization,
    /// See [`TokenError::Signature`]
    Signature,
    /// See [`TokenError::AlgorithmMismatch`]
    AlgorithmMismatch,
    /// See [`TokenError::Expired`]
    Expired,
    /// See [`TokenError::Signing`]
    Signing,
    /// See [`TokenError::InvalidKey`]
    InvalidKey,
    /// See [`TokenError::InvalidConfig`]
    InvalidConfig,
    /// See [`TokenError::Internal`]
    Internal,
}

impl TokenErrorKind {
    /// Stable lowercase name used in log fields
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TokenErrorKind::Format => "format",
            TokenErrorKind::Encoding => "encoding",
            TokenErrorKind::Serialization => "serialization",
            TokenErrorKind::Signature => "signature",
            TokenErrorKind::AlgorithmMismatch => "algorithm_mismatch",
            TokenErrorKind::Expired => "expired",
            TokenErrorKind::Signing => "signing",
            TokenErrorKind::InvalidKey => "invalid_key",
            TokenErrorKind::InvalidConfig => "invalid_config",
            TokenErrorKind::Internal => "internal",
        }
    }
}

impl TokenError {
    /// Create a format error
    #[inline]
    #[must_use]
    pub fn format(msg: &str) -> Self {
        TokenError::Format(msg.to_string())
    }

    /// Create an encoding error
    #[inline]
    #[must_use]
    pub fn encoding(msg: &str) -> Self {
        TokenError::Encoding(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        TokenError::Serialization(msg.to_string())
    }

    /// Create an algorithm mismatch error from `alg/typ` pairs
    #[inline]
    #[must_use]
    pub fn algorithm_mismatch(expected: (&str, &str), found: (&str, &str)) -> Self {
        TokenError::AlgorithmMismatch {
            expected: format!("{}/{}", expected.0, expected.1),
            found: format!("{}/{}", found.0, found.1),
        }
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        TokenError::Signing(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        TokenError::InvalidKey(msg.to_string())
    }

    /// Create an invalid configuration error
    #[inline]
    #[must_use]
    pub fn invalid_config(msg: &str) -> Self {
        TokenError::InvalidConfig(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        TokenError::Internal(msg.to_string())
    }

    /// Discriminant without payload
    #[must_use]
    pub fn kind(&self) -> TokenErrorKind {
        match self {
            TokenError::Format(_) => TokenErrorKind::Format,
            TokenError::Encoding(_) => TokenErrorKind::Encoding,
            TokenError::Serialization(_) => TokenErrorKind::Serialization,
            TokenError::Signature => TokenErrorKind::Signature,
            TokenError::AlgorithmMismatch { .. } => TokenErrorKind::AlgorithmMismatch,
            TokenError::Expired => TokenErrorKind::Expired,
            TokenError::Signing(_) => TokenErrorKind::Signing,
            TokenError::InvalidKey(_) => TokenErrorKind::InvalidKey,
            TokenError::InvalidConfig(_) => TokenErrorKind::InvalidConfig,
            TokenError::Internal(_) => TokenErrorKind::Internal,
        }
    }

    /// True for failures that can only come out of the verify path
    /// when the token itself was rejected.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.kind(),
            TokenErrorKind::Format
                | TokenErrorKind::Encoding
                | TokenErrorKind::Serialization
                | TokenErrorKind::Signature
                | TokenErrorKind::AlgorithmMismatch
                | TokenErrorKind::Expired
        )
    }

    /// Message safe to show an untrusted party.
    ///
    /// Every rejection collapses to [`PUBLIC_VERIFY_MESSAGE`] so the
    /// failing stage cannot be used as an oracle. Use `Display` or
    /// [`TokenError::kind`] for internal diagnostics.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        if self.is_rejection() {
            PUBLIC_VERIFY_MESSAGE
        } else {
            "token service unavailable"
        }
    }
}
