//! Fakes shared by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use url::Url;

use crate::config::OAuthConfig;
use crate::error::AuthError;
use crate::net::token::{TokenEndpoint, TokenHttpResponse};
use crate::services::auth::AuthService;
use crate::util::browser::Browser;
use crate::util::storage::MemoryStore;

/// Bare origin, as `window.location.origin` reports it.
pub(crate) const APP_ORIGIN: &str = "https://app.example.com";

pub(crate) fn test_config() -> OAuthConfig {
    OAuthConfig::new(
        "client-1",
        "https://idp.example.com/auth".parse().unwrap(),
        "https://idp.example.com/token".parse().unwrap(),
        APP_ORIGIN,
    )
}

pub(crate) fn test_config_with_logout() -> OAuthConfig {
    test_config().with_logout_url("https://idp.example.com/logout".parse().unwrap())
}

/// Compact token whose claims segment encodes `claims`.
pub(crate) fn id_token(claims: &serde_json::Value) -> String {
    format!("eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl", URL_SAFE_NO_PAD.encode(claims.to_string()))
}

/// Browser that records navigation instead of performing it.
#[derive(Debug, Default)]
pub(crate) struct RecordingBrowser {
    pub href: RefCell<String>,
    pub navigations: RefCell<Vec<String>>,
    pub replaced: RefCell<Vec<String>>,
    pub reloads: Cell<u32>,
}

impl RecordingBrowser {
    pub fn at(href: &str) -> Self {
        Self { href: RefCell::new(href.to_owned()), ..Self::default() }
    }

    pub fn last_navigation(&self) -> Option<Url> {
        self.navigations.borrow().last().map(|u| Url::parse(u).unwrap())
    }
}

impl Browser for RecordingBrowser {
    fn href(&self) -> String {
        self.href.borrow().clone()
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_owned());
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn replace_url(&self, url: &str) {
        self.replaced.borrow_mut().push(url.to_owned());
    }
}

/// Token endpoint that replays one scripted reply and records requests.
#[derive(Default)]
pub(crate) struct ScriptedEndpoint {
    reply: RefCell<Option<Result<TokenHttpResponse, AuthError>>>,
    pub requests: RefCell<Vec<(String, String)>>,
}

impl ScriptedEndpoint {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: RefCell::new(Some(Ok(TokenHttpResponse { status, body: body.into() }))),
            requests: RefCell::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: RefCell::new(Some(Err(AuthError::Transport(message.to_owned())))),
            requests: RefCell::default(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl TokenEndpoint for ScriptedEndpoint {
    async fn post_form(&self, url: &Url, form: String) -> Result<TokenHttpResponse, AuthError> {
        self.requests.borrow_mut().push((url.to_string(), form));
        self.reply
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(AuthError::Transport("no scripted reply".to_owned())))
    }
}

/// An `AuthService` with handles to its fakes.
pub(crate) struct Harness {
    pub store: Rc<MemoryStore>,
    pub browser: Rc<RecordingBrowser>,
    pub endpoint: Rc<ScriptedEndpoint>,
    pub service: AuthService,
}

impl Harness {
    pub fn new(config: OAuthConfig, href: &str, endpoint: ScriptedEndpoint) -> Self {
        let store = Rc::new(MemoryStore::new());
        let browser = Rc::new(RecordingBrowser::at(href));
        let endpoint = Rc::new(endpoint);
        let service = AuthService::new(config, store.clone(), browser.clone(), endpoint.clone());
        Self { store, browser, endpoint, service }
    }

    /// Harness on a plain page load with no token endpoint reply scripted.
    pub fn idle() -> Self {
        Self::new(test_config(), APP_ORIGIN, ScriptedEndpoint::default())
    }
}
