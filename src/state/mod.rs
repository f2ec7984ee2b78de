//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the persisted record; `auth` is the UI-facing phase that
//! wraps it.

pub mod auth;
pub mod session;
