//! Compact identity-token claim decoding.
//!
//! SECURITY
//! ========
//! Claims are read without verifying the token signature or issuer. The
//! token arrives directly from the configured token endpoint over TLS, but a
//! caller that forwards these claims to a trust decision must verify the
//! token against the provider's keys first.

#[cfg(test)]
#[path = "jwt_test.rs"]
mod jwt_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::ClaimsError;

/// Identity claims the session is built from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode the claims (middle) segment of a `header.claims.signature` token.
///
/// # Errors
///
/// - [`ClaimsError::SegmentCount`] unless there are exactly three segments
/// - [`ClaimsError::Encoding`] if the claims segment is not base64url
/// - [`ClaimsError::Payload`] if it does not decode to a claims object
pub fn decode_claims(token: &str) -> Result<IdClaims, ClaimsError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, claims, _] = segments.as_slice() else {
        return Err(ClaimsError::SegmentCount(segments.len()));
    };
    let bytes = URL_SAFE_NO_PAD.decode(claims.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}
