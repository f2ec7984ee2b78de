//! Stateful services shared through Leptos context.

pub mod auth;
