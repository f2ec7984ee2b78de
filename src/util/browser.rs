//! Page location and navigation.
//!
//! Everything the auth flow needs from `window.location` and
//! `window.history` goes through [`Browser`], plus pure helpers for
//! reading and cleaning the OAuth callback query string.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use url::Url;

/// The browser surface used by the auth service.
pub trait Browser {
    /// Full current URL (`location.href`).
    fn href(&self) -> String;
    /// Leave the page for `url`.
    fn navigate(&self, url: &str);
    fn reload(&self);
    /// Rewrite the address bar without reloading (`history.replaceState`).
    fn replace_url(&self, url: &str);
}

/// Query parameters an authorization server appends on redirect back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl CallbackParams {
    /// Read `code` and `state` from a full URL. An unparseable URL yields neither.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let Ok(url) = Url::parse(href) else {
            return Self::default();
        };
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" if params.code.is_none() => params.code = Some(value.into_owned()),
                "state" if params.state.is_none() => params.state = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }
}

/// True when the query string looks like an OAuth redirect callback.
#[must_use]
pub fn is_redirect_callback(search: &str) -> bool {
    search.contains("code=") && search.contains("state=")
}

/// `href` with the `code` and `state` parameters removed, as a
/// path-relative URL suitable for `history.replaceState`.
#[must_use]
pub fn strip_callback_params(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "code" && k != "state")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut stripped = url.path().to_owned();
    if !kept.is_empty() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(kept)
            .finish();
        stripped.push('?');
        stripped.push_str(&query);
    }
    if let Some(fragment) = url.fragment() {
        stripped.push('#');
        stripped.push_str(fragment);
    }
    Some(stripped)
}

/// `window.location` / `window.history` of the current page.
#[cfg(feature = "csr")]
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowBrowser;

#[cfg(feature = "csr")]
impl WindowBrowser {
    /// Page origin, e.g. `https://app.example.com`.
    #[must_use]
    pub fn origin() -> String {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
}

#[cfg(feature = "csr")]
impl Browser for WindowBrowser {
    fn href(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }

    fn replace_url(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let title = window.document().map(|d| d.title()).unwrap_or_default();
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, &title, Some(url));
        }
    }
}
