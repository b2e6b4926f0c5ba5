//! Token string and its segments

use crate::error::{TokenError, TokenResult};

/// Segment separator
pub const SEPARATOR: char = '.';

/// Issued token: `header.payload.signature`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_parts(content: &[u8], signature_hex: &str) -> TokenResult<Self> {
        // content is ASCII base64 text joined by '.', so this only fails on a framing bug
        let content = std::str::from_utf8(content)
            .map_err(|_| TokenError::internal("signed content is not ASCII"))?;
        let mut token = String::with_capacity(content.len() + 1 + signature_hex.len());
        token.push_str(content);
        token.push(SEPARATOR);
        token.push_str(signature_hex);
        Ok(Self(token))
    }

    /// Token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the token text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Borrowed view of the three segments.
    ///
    /// # Errors
    /// Never fails for tokens produced by this crate; see [`TokenSegments::split`].
    pub fn segments(&self) -> TokenResult<TokenSegments<'_>> {
        TokenSegments::split(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// The three raw, still-encoded segments of a token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSegments<'a> {
    /// Base64 header segment
    pub header: &'a str,
    /// Base64 claims segment
    pub payload: &'a str,
    /// Hex signature segment
    pub signature: &'a str,
}

impl<'a> TokenSegments<'a> {
    /// Split token text on `.`.
    ///
    /// # Errors
    /// Returns [`TokenError::Format`] unless there are exactly three
    /// non-empty segments.
    pub fn split(token: &'a str) -> TokenResult<Self> {
        let mut parts = token.split(SEPARATOR);
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::format("token must have exactly three segments"));
        };
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::format("token segments must be non-empty"));
        }
        Ok(Self {
            header,
            payload,
            signature,
        })
    }
}
