//! Browser glue and pure helpers shared by the auth service and UI.

pub mod browser;
pub mod jwt;
pub mod storage;
