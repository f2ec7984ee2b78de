//! # oauth-gate
//!
//! Leptos + WASM client for the OAuth2 Authorization Code flow.
//!
//! The crate redirects the browser to an external authorization server,
//! exchanges the returned code for tokens, decodes the identity claims and
//! keeps the resulting session in browser storage. A `SessionGate` component
//! wraps the application and renders loading, login or content based on the
//! session phase.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;

/// WASM entry point: installs browser logging and mounts the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    app::mount();
}
