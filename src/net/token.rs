//! Authorization-code exchange against the provider's token endpoint.
//!
//! Client-side (`csr`): real HTTP via `gloo-net`. Everything above the raw
//! POST (form encoding, status handling, response parsing) is plain Rust so
//! it runs under native tests with a scripted endpoint.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use serde::Deserialize;
use url::Url;

use crate::config::{OAuthConfig, RESPONSE_TYPE};
use crate::error::AuthError;

/// Status and body of a token endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHttpResponse {
    pub status: u16,
    pub body: String,
}

impl TokenHttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport for the form-encoded token POST. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait TokenEndpoint {
    /// POST `form` as `application/x-www-form-urlencoded` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Transport`] when no HTTP response was received.
    async fn post_form(&self, url: &Url, form: String) -> Result<TokenHttpResponse, AuthError>;
}

/// Token endpoint reply body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Authorization endpoint URL for a sign-in carrying `state`.
#[must_use]
pub fn authorization_url(config: &OAuthConfig, state: &str) -> Url {
    let mut url = config.authorization_url().clone();
    url.query_pairs_mut()
        .append_pair("response_type", RESPONSE_TYPE)
        .append_pair("client_id", config.client_id())
        .append_pair("redirect_uri", config.redirect_uri())
        .append_pair("scope", &config.scopes().join(" "))
        .append_pair("state", state);
    url
}

/// Provider logout URL, when the provider has a logout endpoint.
#[must_use]
pub fn logout_url(config: &OAuthConfig) -> Option<Url> {
    let mut url = config.logout_url()?.clone();
    url.query_pairs_mut()
        .append_pair("client_id", config.client_id())
        .append_pair("logout_uri", config.redirect_uri());
    Some(url)
}

/// Form body for the `authorization_code` grant. No client secret is sent.
#[must_use]
pub fn token_request_form(config: &OAuthConfig, code: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "authorization_code")
        .append_pair("code", code)
        .append_pair("redirect_uri", config.redirect_uri())
        .append_pair("client_id", config.client_id())
        .finish()
}

/// Exchange an authorization code for tokens.
///
/// # Errors
///
/// Returns [`AuthError::Transport`] on network failure,
/// [`AuthError::TokenExchange`] on a non-2xx status, or
/// [`AuthError::TokenResponse`] if the body lacks the expected tokens.
pub async fn exchange_code(
    endpoint: &dyn TokenEndpoint,
    config: &OAuthConfig,
    code: &str,
) -> Result<TokenResponse, AuthError> {
    let response = endpoint
        .post_form(config.token_url(), token_request_form(config, code))
        .await?;
    if !response.is_success() {
        return Err(AuthError::TokenExchange { status: response.status, detail: response.body });
    }
    serde_json::from_str(&response.body).map_err(AuthError::TokenResponse)
}

/// Token endpoint reached through `fetch`.
#[cfg(feature = "csr")]
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTokenEndpoint;

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl TokenEndpoint for GlooTokenEndpoint {
    async fn post_form(&self, url: &Url, form: String) -> Result<TokenHttpResponse, AuthError> {
        let resp = gloo_net::http::Request::post(url.as_str())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form)
            .map_err(|e| AuthError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(TokenHttpResponse { status, body })
    }
}
