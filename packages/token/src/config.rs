//! Token configuration.
//!
//! A [`TokenConfig`] names the header identifiers a builder stamps into new
//! tokens and a verifier insists on, plus the expiry leeway. It can be passed
//! explicitly, or installed once per process and read back with
//! [`TokenConfig::global`].

use crate::{
    error::{TokenError, TokenResult},
    header::Header,
};
use chrono::Duration;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Default algorithm identifier: ECDSA P-256 over a SHA-256 digest.
pub const DEFAULT_ALGORITHM: &str = "P256-with-SHA256";
/// Default token type identifier.
pub const DEFAULT_TOKEN_TYPE: &str = "JWT";

/// Environment variable overriding the algorithm identifier.
pub const ENV_ALGORITHM: &str = "CRYYPT_TOKEN_ALG";
/// Environment variable overriding the token type identifier.
pub const ENV_TOKEN_TYPE: &str = "CRYYPT_TOKEN_TYP";
/// Environment variable holding the expiry leeway in seconds.
pub const ENV_LEEWAY_SECS: &str = "CRYYPT_TOKEN_LEEWAY_SECS";

static GLOBAL_CONFIG: OnceCell<TokenConfig> = OnceCell::new();

/// Header identifiers and validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Algorithm identifier written to and expected in `alg`.
    pub algorithm: String,
    /// Type identifier written to and expected in `typ`.
    pub token_type: String,
    /// Seconds of clock skew tolerated when checking `exp`.
    pub leeway_seconds: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            leeway_seconds: 0,
        }
    }
}

impl TokenConfig {
    /// Configuration with explicit identifiers and no leeway.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidConfig`] if either identifier is empty.
    pub fn new(algorithm: impl Into<String>, token_type: impl Into<String>) -> TokenResult<Self> {
        let config = Self {
            algorithm: algorithm.into(),
            token_type: token_type.into(),
            leeway_seconds: 0,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the expiry leeway.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway_seconds = leeway.num_seconds();
        self
    }

    /// Expiry leeway as a duration; zero if negative or out of range.
    #[must_use]
    pub fn leeway(&self) -> Duration {
        Duration::try_seconds(self.leeway_seconds.max(0)).unwrap_or_default()
    }

    /// Check identifiers are non-empty and leeway is a non-negative, representable span.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> TokenResult<()> {
        if self.algorithm.is_empty() {
            return Err(TokenError::invalid_config("algorithm identifier is empty"));
        }
        if self.token_type.is_empty() {
            return Err(TokenError::invalid_config("token type identifier is empty"));
        }
        if self.leeway_seconds < 0 {
            return Err(TokenError::invalid_config("leeway must not be negative"));
        }
        if Duration::try_seconds(self.leeway_seconds).is_none() {
            return Err(TokenError::invalid_config("leeway is out of range"));
        }
        Ok(())
    }

    /// Load from `CRYYPT_TOKEN_*` environment variables, defaulting unset ones.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidConfig`] on an unparsable leeway or an
    /// identifier set to the empty string.
    pub fn from_env() -> TokenResult<Self> {
        let mut config = Self::default();
        if let Ok(alg) = std::env::var(ENV_ALGORITHM) {
            config.algorithm = alg;
        }
        if let Ok(typ) = std::env::var(ENV_TOKEN_TYPE) {
            config.token_type = typ;
        }
        if let Ok(leeway) = std::env::var(ENV_LEEWAY_SECS) {
            config.leeway_seconds = leeway.trim().parse().map_err(|_| {
                TokenError::InvalidConfig(format!("{ENV_LEEWAY_SECS} is not an integer"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Header stamped into tokens built under this configuration.
    #[must_use]
    pub fn default_header(&self) -> Header {
        Header::new(self.algorithm.clone(), self.token_type.clone())
    }

    /// Make this the process-wide default. Allowed once.
    ///
    /// # Errors
    /// Returns [`TokenError::InvalidConfig`] if the value is invalid or a
    /// default was already installed or read.
    pub fn install(self) -> TokenResult<()> {
        self.validate()?;
        GLOBAL_CONFIG
            .set(self)
            .map_err(|_| TokenError::invalid_config("process-wide token config already set"))?;
        tracing::debug!("process-wide token config installed");
        Ok(())
    }

    /// Process-wide default; the built-in default unless [`install`](Self::install) ran first.
    #[must_use]
    pub fn global() -> &'static TokenConfig {
        GLOBAL_CONFIG.get_or_init(TokenConfig::default)
    }
}
