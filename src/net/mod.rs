//! HTTP calls to the OAuth provider.

pub mod token;
