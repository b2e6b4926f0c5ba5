//! Compact signed claim tokens
//!
//! A token is `B64URL(header JSON) . B64URL(claims JSON) . HEX(signature)`.
//! The signature is ECDSA P-256 over the SHA-256 digest of the first two
//! segments exactly as they appear in the token text.
//!
//! ```no_run
//! use cryypt_token::{Claims, TokenBuilder, TokenConfig, TokenVerifier, keys};
//! use chrono::Duration;
//!
//! # fn main() -> Result<(), cryypt_token::TokenError> {
//! # let private_pem: &[u8] = b"";
//! # let public_pem: &[u8] = b"";
//! let signing_key = keys::signing_key_from_bytes(private_pem)?;
//! let verifying_key = keys::verifying_key_from_bytes(public_pem)?;
//!
//! let claims = Claims::builder()
//!     .subject("alice")
//!     .expires_in(Duration::hours(1))
//!     .build();
//!
//! let config = TokenConfig::default();
//! let token = TokenBuilder::new(config.clone()).build(&claims, &signing_key)?;
//! let verified = TokenVerifier::new(config).verify(token.as_str(), &verifying_key)?;
//! assert_eq!(verified, claims);
//! # Ok(())
//! # }
//! ```

pub mod async_ops;
pub mod builder;
pub mod claims;
pub mod codec;
pub mod config;
pub mod content;
mod error;
pub mod expiry;
pub mod header;
pub mod keys;
pub mod token;
pub mod verifier;

pub use async_ops::AsyncTokenResult;
pub use builder::{TokenBuilder, build_token};
pub use claims::{Claims, ClaimsBuilder};
pub use config::TokenConfig;
pub use error::*;
pub use expiry::ExpiryPolicy;
pub use header::Header;
pub use keys::{TokenSigningKey, TokenVerifyingKey};
pub use token::{Token, TokenSegments};
pub use verifier::{TokenVerifier, verify_token};

/// Main entry point
pub struct Cryypt;

impl Cryypt {
    /// Builder bound to the process-wide configuration
    #[must_use]
    pub fn token_builder() -> TokenBuilder {
        TokenBuilder::default()
    }

    /// Verifier bound to the process-wide configuration
    #[must_use]
    pub fn token_verifier() -> TokenVerifier {
        TokenVerifier::default()
    }
}
