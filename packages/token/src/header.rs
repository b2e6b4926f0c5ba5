//! Token header

use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Token header structure.
///
/// Field order is fixed: serialization always yields
/// `{"alg":"...","typ":"..."}` because these bytes feed the signed digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm identifier.
    pub alg: String,
    /// Token type identifier.
    pub typ: String,
}

impl Header {
    /// Create a header from explicit identifiers.
    ///
    /// Both identifiers are expected to be non-empty; building a token
    /// with an empty one fails with [`TokenError::Serialization`].
    #[must_use]
    pub fn new(alg: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            typ: typ.into(),
        }
    }

    /// Both identifiers present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.alg.is_empty() && !self.typ.is_empty()
    }

    /// Whether this header carries exactly the given identifiers
    #[must_use]
    pub fn matches(&self, alg: &str, typ: &str) -> bool {
        self.alg == alg && self.typ == typ
    }

    /// Canonical JSON bytes.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialization`] if either identifier is empty.
    pub fn to_json(&self) -> TokenResult<Vec<u8>> {
        if !self.is_complete() {
            return Err(TokenError::serialization(
                "header identifiers must be non-empty",
            ));
        }
        serde_json::to_vec(self).map_err(|e| TokenError::Serialization(e.to_string()))
    }

    /// Parse header JSON. Unknown extra fields are ignored.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialization`] on malformed JSON or a
    /// missing `alg`/`typ` field.
    pub fn from_json(bytes: &[u8]) -> TokenResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| TokenError::Serialization(e.to_string()))
    }
}
