//! Error types for the OAuth handshake and session store.
//!
//! ERROR HANDLING
//! ==============
//! Internal steps return these errors with `?`. The public `AuthService`
//! operations log them and collapse every failure into "no session", so
//! the UI only ever distinguishes signed-in from signed-out.

/// Failure to decode the claims segment of a compact identity token.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    #[error("claims segment is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("claims segment is not a valid claims object: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid state parameter, possible CSRF attack")]
    StateMismatch,
    #[error("redirect carried no authorization code")]
    MissingCode,
    #[error("token exchange failed: {status}: {detail}")]
    TokenExchange { status: u16, detail: String },
    #[error("token endpoint unreachable: {0}")]
    Transport(String),
    #[error("unexpected token response: {0}")]
    TokenResponse(serde_json::Error),
    #[error("identity token decode failed: {0}")]
    TokenDecode(#[from] ClaimsError),
    #[error("stored session is unreadable: {0}")]
    SessionParse(String),
    #[error("stored session has expired")]
    SessionExpired,
}
