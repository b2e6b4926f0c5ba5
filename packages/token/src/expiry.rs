//! Expiry policy for the reserved `exp` claim

use crate::{
    claims::Claims,
    error::{TokenError, TokenResult},
};
use chrono::{DateTime, Duration, Utc};

/// Checks `exp` against a clock reading.
///
/// A token without `exp` never expires. A token whose `exp` plus leeway is
/// at or before `now` has expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    leeway: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(Duration::zero())
    }
}

impl ExpiryPolicy {
    /// Policy with the given clock-skew allowance. Negative spans count as zero.
    #[must_use]
    pub fn new(leeway: Duration) -> Self {
        Self {
            leeway: leeway.max(Duration::zero()),
        }
    }

    /// Parse a decimal Unix-seconds `exp` value.
    ///
    /// # Errors
    /// Returns [`TokenError::Format`] unless `raw` is an optional `-` followed
    /// by ASCII digits, or if it is out of the representable range.
    pub fn parse_expiry(raw: &str) -> TokenResult<DateTime<Utc>> {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::format("exp is not a decimal timestamp"));
        }
        let seconds: i64 = raw
            .parse()
            .map_err(|_| TokenError::format("exp is out of range"))?;
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .ok_or_else(|| TokenError::format("exp is out of range"))
    }

    /// Apply the policy.
    ///
    /// # Errors
    /// [`TokenError::Format`] for an unparsable `exp`, [`TokenError::Expired`]
    /// once it has passed.
    pub fn check(&self, claims: &Claims, now: DateTime<Utc>) -> TokenResult<()> {
        let Some(raw) = claims.expiry() else {
            return Ok(());
        };
        let expires_at = Self::parse_expiry(raw)?;
        let deadline = expires_at
            .checked_add_signed(self.leeway)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if deadline <= now {
            return Err(TokenError::Expired);
        }
        Ok(())
    }
}
