//! OAuth2 authorization-code handshake and session store.
//!
//! ARCHITECTURE
//! ============
//! One `AuthService` is built at app start and shared through context. It
//! owns the in-memory session cache and reaches storage, the page location
//! and the token endpoint only through injected trait objects.
//!
//! TRADE-OFFS
//! ==========
//! The anti-forgery state is consumed before it is compared, so a callback
//! can be attempted at most once per sign-in. Every failure is logged and
//! reported to callers as "no session"; there is no retry.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::Rc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::{OAuthConfig, storage_keys};
use crate::error::AuthError;
use crate::net::token::{self, TokenEndpoint};
use crate::state::session::Session;
use crate::util::browser::{Browser, CallbackParams, strip_callback_params};
use crate::util::jwt::decode_claims;
use crate::util::storage::{self, KeyValueStore};

/// Generate a random anti-forgery state value (32 hex chars).
#[must_use]
pub fn generate_state() -> String {
    Uuid::new_v4().simple().to_string()
}

pub struct AuthService {
    config: OAuthConfig,
    storage: Rc<dyn KeyValueStore>,
    browser: Rc<dyn Browser>,
    tokens: Rc<dyn TokenEndpoint>,
    current: RefCell<Option<Session>>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        config: OAuthConfig,
        storage: Rc<dyn KeyValueStore>,
        browser: Rc<dyn Browser>,
        tokens: Rc<dyn TokenEndpoint>,
    ) -> Self {
        Self { config, storage, browser, tokens, current: RefCell::new(None) }
    }

    /// Service wired to `localStorage`, `window.location` and `fetch`.
    ///
    /// Falls back to in-memory storage when `localStorage` is unavailable,
    /// in which case sessions do not survive a reload.
    #[cfg(feature = "csr")]
    #[must_use]
    pub fn in_browser(config: OAuthConfig) -> Self {
        use crate::net::token::GlooTokenEndpoint;
        use crate::util::browser::WindowBrowser;
        use crate::util::storage::{BrowserStorage, MemoryStore};

        let storage: Rc<dyn KeyValueStore> = match BrowserStorage::local() {
            Some(local) => Rc::new(local),
            None => {
                leptos::logging::warn!("localStorage unavailable, session will not persist");
                Rc::new(MemoryStore::new())
            }
        };
        Self::new(config, storage, Rc::new(WindowBrowser), Rc::new(GlooTokenEndpoint))
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    #[must_use]
    pub fn browser(&self) -> &dyn Browser {
        self.browser.as_ref()
    }

    /// Send the browser to the provider's authorization page.
    ///
    /// Any existing session is discarded first.
    pub fn sign_in_with_redirect(&self) {
        self.clear_session();
        let state = generate_state();
        self.storage.set(storage_keys::OAUTH_STATE, &state);
        let url = token::authorization_url(&self.config, &state);
        self.browser.navigate(url.as_str());
    }

    /// Complete a provider callback: validate state, exchange the code and
    /// store the resulting session.
    ///
    /// Returns `None` on any failure; the reason is logged.
    pub async fn handle_redirect(&self) -> Option<Session> {
        match self.try_handle_redirect().await {
            Ok(session) => Some(session),
            Err(e @ AuthError::MissingCode) => {
                leptos::logging::warn!("{e}");
                None
            }
            Err(e @ AuthError::StateMismatch) => {
                leptos::logging::error!("{e}");
                None
            }
            Err(e) => {
                leptos::logging::error!("Authentication failed: {e}");
                None
            }
        }
    }

    async fn try_handle_redirect(&self) -> Result<Session, AuthError> {
        let params = CallbackParams::from_href(&self.browser.href());
        let stored_state = self.storage.take(storage_keys::OAUTH_STATE);

        match (params.state.as_deref(), stored_state.as_deref()) {
            (Some(returned), Some(stored)) if returned == stored => {}
            _ => return Err(AuthError::StateMismatch),
        }
        let code = params.code.ok_or(AuthError::MissingCode)?;

        let tokens = token::exchange_code(self.tokens.as_ref(), &self.config, &code).await?;
        let claims = decode_claims(&tokens.id_token)?;

        self.storage.set(storage_keys::ACCESS_TOKEN, &tokens.access_token);
        self.storage.set(storage_keys::ID_TOKEN, &tokens.id_token);
        if let Some(refresh) = &tokens.refresh_token {
            self.storage.set(storage_keys::REFRESH_TOKEN, refresh);
        }

        let session = Session::from_claims(claims, tokens.access_token, tokens.id_token);
        storage::save_json(self.storage.as_ref(), storage_keys::USER_DATA, &session);
        *self.current.borrow_mut() = Some(session.clone());

        if let Some(clean) = strip_callback_params(&self.browser.href()) {
            self.browser.replace_url(&clean);
        }
        Ok(session)
    }

    /// Current session from memory or storage.
    ///
    /// An expired session triggers [`sign_out`](Self::sign_out) and yields
    /// `None`, as does an unreadable stored record.
    pub fn get_current_user(&self) -> Option<Session> {
        match self.load_session(OffsetDateTime::now_utc()) {
            Ok(session) => session,
            Err(AuthError::SessionExpired) => {
                leptos::logging::log!("session expired, signing out");
                self.sign_out();
                None
            }
            Err(e) => {
                leptos::logging::error!("Failed to get current user: {e}");
                None
            }
        }
    }

    fn load_session(&self, now: OffsetDateTime) -> Result<Option<Session>, AuthError> {
        let cached = self.current.borrow().clone();
        let session = match cached {
            Some(session) => session,
            None => {
                let stored: Option<Session> = storage::load_json(self.storage.as_ref(), storage_keys::USER_DATA)
                    .map_err(|e| AuthError::SessionParse(e.to_string()))?;
                let Some(session) = stored else {
                    return Ok(None);
                };
                if !session.is_authenticated {
                    return Err(AuthError::SessionParse("record is not authenticated".to_owned()));
                }
                session
            }
        };

        if session.is_expired_at(now) {
            return Err(AuthError::SessionExpired);
        }
        *self.current.borrow_mut() = Some(session.clone());
        Ok(Some(session))
    }

    /// Drop all local session state, then leave through the provider's
    /// logout endpoint or reload the page.
    pub fn sign_out(&self) {
        self.clear_session();
        match token::logout_url(&self.config) {
            Some(url) => self.browser.navigate(url.as_str()),
            None => self.browser.reload(),
        }
    }

    /// Persisted identity token, if any.
    pub fn get_id_token(&self) -> Option<String> {
        self.storage.get(storage_keys::ID_TOKEN)
    }

    fn clear_session(&self) {
        for key in [
            storage_keys::ID_TOKEN,
            storage_keys::ACCESS_TOKEN,
            storage_keys::REFRESH_TOKEN,
            storage_keys::USER_DATA,
        ] {
            self.storage.remove(key);
        }
        *self.current.borrow_mut() = None;
    }
}
