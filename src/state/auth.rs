//! Auth phase for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthPhase>` context. The session gate and user-aware
//! pages match on it instead of juggling separate loading/authenticated flags.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::Session;

/// Where the browser is in the sign-in lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Nothing resolved yet, or a sign-in redirect is being started.
    #[default]
    Loading,
    /// The page was loaded as a provider callback and the code exchange is in flight.
    PendingRedirect,
    SignedOut,
    SignedIn(Session),
}

impl AuthPhase {
    /// Phase after a session lookup or redirect exchange has finished.
    #[must_use]
    pub fn settled(session: Option<Session>) -> Self {
        session.map_or(Self::SignedOut, Self::SignedIn)
    }

    /// True while the loading screen should be shown.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::PendingRedirect)
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}
