//! The signed-in session record.
//!
//! DESIGN
//! ======
//! A `Session` only exists fully populated: it is built from decoded identity
//! claims after a successful code exchange, and a stored record that fails to
//! parse (or claims to be unauthenticated) is treated as no session at all.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::util::jwt::IdClaims;

/// Identity provider that issued the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Oauth,
}

/// Authenticated user session, persisted as camelCase JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<OffsetDateTime>,
    pub is_authenticated: bool,
    pub provider: AuthProvider,
}

impl Session {
    /// Build a session from identity claims and the tokens they came with.
    ///
    /// The username is the email claim when present and non-empty, otherwise
    /// the subject. An `exp` outside the representable range leaves the
    /// session without an expiry.
    #[must_use]
    pub fn from_claims(claims: IdClaims, access_token: String, id_token: String) -> Self {
        let email = claims.email.filter(|e| !e.is_empty());
        let username = email.clone().unwrap_or(claims.sub);
        let expires_at = claims.exp.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok());
        Self {
            username,
            email,
            access_token,
            id_token: Some(id_token),
            expires_at,
            is_authenticated: true,
            provider: AuthProvider::Oauth,
        }
    }

    /// True when the session carries an expiry that lies before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }

    /// Expiry as milliseconds since the Unix epoch.
    #[must_use]
    pub fn expires_at_millis(&self) -> Option<i128> {
        self.expires_at.map(|at| at.unix_timestamp_nanos() / 1_000_000)
    }
}
