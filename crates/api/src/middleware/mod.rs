//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac`] -- role gates layered on top of [`auth::AuthUser`].

pub mod auth;
pub mod rbac;
