//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a verified JWT Bearer token.

pub mod auth;
