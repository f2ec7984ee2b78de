//! OAuth provider configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! A browser bundle has no process environment, so provider settings are
//! baked in at build time through `option_env!`. Parsing goes through
//! [`OAuthConfig::from_lookup`] so the same rules are testable natively.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

pub const DEFAULT_SCOPES: &[&str] = &["openid", "email", "profile"];
pub const RESPONSE_TYPE: &str = "code";

/// Browser storage keys shared by the auth service.
pub mod storage_keys {
    pub const ID_TOKEN: &str = "id-token";
    pub const ACCESS_TOKEN: &str = "access-token";
    pub const REFRESH_TOKEN: &str = "refresh-token";
    pub const USER_DATA: &str = "user-data";
    pub const OAUTH_STATE: &str = "oauth_state";
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {var}")]
    Missing { var: &'static str },
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Third-party OAuth provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    client_id: String,
    authorization_url: Url,
    token_url: Url,
    logout_url: Option<Url>,
    /// Kept verbatim: providers match it byte-for-byte against the
    /// registered value, and `Url` would append a trailing `/` to an origin.
    redirect_uri: String,
    scopes: Vec<String>,
}

impl OAuthConfig {
    /// Create a configuration with the default scopes and no logout endpoint.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        authorization_url: Url,
        token_url: Url,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            authorization_url,
            token_url,
            logout_url: None,
            redirect_uri: redirect_uri.into(),
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn with_logout_url(mut self, url: Url) -> Self {
        self.logout_url = Some(url);
        self
    }

    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Build config from variables captured when the bundle was compiled.
    ///
    /// Required:
    /// - `OAUTH_CLIENT_ID`
    /// - `OAUTH_AUTHORIZATION_URL`
    /// - `OAUTH_TOKEN_URL`
    ///
    /// Optional:
    /// - `OAUTH_LOGOUT_URL`: sign-out only clears local state when absent
    /// - `OAUTH_REDIRECT_URI`: defaults to `origin`
    /// - `OAUTH_SCOPES`: space or comma separated, default `openid email profile`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a URL
    /// does not parse.
    pub fn from_build_env(origin: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |var| match var {
                "OAUTH_CLIENT_ID" => option_env!("OAUTH_CLIENT_ID"),
                "OAUTH_AUTHORIZATION_URL" => option_env!("OAUTH_AUTHORIZATION_URL"),
                "OAUTH_TOKEN_URL" => option_env!("OAUTH_TOKEN_URL"),
                "OAUTH_LOGOUT_URL" => option_env!("OAUTH_LOGOUT_URL"),
                "OAUTH_REDIRECT_URI" => option_env!("OAUTH_REDIRECT_URI"),
                "OAUTH_SCOPES" => option_env!("OAUTH_SCOPES"),
                _ => None,
            }
            .map(str::to_owned),
            origin,
        )
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a URL
    /// does not parse.
    pub fn from_lookup<F>(lookup: F, origin: &str) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |var: &'static str| lookup(var).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let client_id = get("OAUTH_CLIENT_ID").ok_or(ConfigError::Missing { var: "OAUTH_CLIENT_ID" })?;
        let authorization_url = required_url(get("OAUTH_AUTHORIZATION_URL"), "OAUTH_AUTHORIZATION_URL")?;
        let token_url = required_url(get("OAUTH_TOKEN_URL"), "OAUTH_TOKEN_URL")?;
        let redirect_uri = get("OAUTH_REDIRECT_URI").unwrap_or_else(|| origin.to_owned());
        parse_url(&redirect_uri, "OAUTH_REDIRECT_URI")?;

        let mut config = Self::new(client_id, authorization_url, token_url, redirect_uri);
        if let Some(raw) = get("OAUTH_LOGOUT_URL") {
            config = config.with_logout_url(parse_url(&raw, "OAUTH_LOGOUT_URL")?);
        }
        if let Some(raw) = get("OAUTH_SCOPES") {
            config = config.with_scopes(parse_scopes(&raw));
        }
        Ok(config)
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn authorization_url(&self) -> &Url {
        &self.authorization_url
    }

    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Provider logout endpoint, if the provider has one.
    #[must_use]
    pub fn logout_url(&self) -> Option<&Url> {
        self.logout_url.as_ref()
    }

    /// Redirect URI registered with the provider; also sent as `logout_uri`.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

fn required_url(raw: Option<String>, var: &'static str) -> Result<Url, ConfigError> {
    let raw = raw.ok_or(ConfigError::Missing { var })?;
    parse_url(&raw, var)
}

fn parse_url(raw: &str, var: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
