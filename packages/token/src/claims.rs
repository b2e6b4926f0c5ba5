//! Token claims and builder.

use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, btree_map};

/// Reserved expiry claim: decimal Unix seconds.
pub const EXPIRY_CLAIM: &str = "exp";
/// Issued-at claim written by [`ClaimsBuilder::issued_now`].
pub const ISSUED_AT_CLAIM: &str = "iat";
/// Subject claim.
pub const SUBJECT_CLAIM: &str = "sub";
/// Issuer claim.
pub const ISSUER_CLAIM: &str = "iss";

/// String claims carried by a token.
///
/// Keys are kept sorted so the serialized payload is identical for equal
/// claim sets regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(BTreeMap<String, String>);

impl Claims {
    /// Empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Start a [`ClaimsBuilder`].
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert or replace a claim, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a claim.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// No claims at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claims in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Raw `exp` value, if present.
    #[must_use]
    pub fn expiry(&self) -> Option<&str> {
        self.get(EXPIRY_CLAIM)
    }

    /// Payload JSON bytes, keys in lexicographic order.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> TokenResult<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(|e| TokenError::Serialization(e.to_string()))
    }

    /// Parse payload JSON. Every value must be a JSON string.
    ///
    /// # Errors
    /// Returns [`TokenError::Serialization`] on malformed JSON, a non-object
    /// payload, or non-string values.
    pub fn from_json(bytes: &[u8]) -> TokenResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| TokenError::Serialization(e.to_string()))
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for Claims {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for Claims {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Claims {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builder for [`Claims`] with helpers for the time-based keys.
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    /// Create a new claims builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject (`sub`) claim.
    #[must_use]
    pub fn subject(self, sub: impl Into<String>) -> Self {
        self.claim(SUBJECT_CLAIM, sub)
    }

    /// Set the issuer (`iss`) claim.
    #[must_use]
    pub fn issuer(self, iss: impl Into<String>) -> Self {
        self.claim(ISSUER_CLAIM, iss)
    }

    /// Add an arbitrary claim.
    #[must_use]
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(key, value);
        self
    }

    /// Set `exp` to an absolute instant.
    #[must_use]
    pub fn expires_at(self, at: DateTime<Utc>) -> Self {
        self.claim(EXPIRY_CLAIM, at.timestamp().to_string())
    }

    /// Set `exp` relative to now.
    #[must_use]
    pub fn expires_in(self, dur: Duration) -> Self {
        self.expires_at(Utc::now() + dur)
    }

    /// Set `iat` to now.
    #[must_use]
    pub fn issued_now(self) -> Self {
        self.claim(ISSUED_AT_CLAIM, Utc::now().timestamp().to_string())
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Claims {
        self.claims
    }
}
