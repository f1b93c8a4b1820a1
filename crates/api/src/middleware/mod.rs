//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated user, from a JWT Bearer token.
//! - [`rbac`] -- one extractor per role set an endpoint admits.

pub mod auth;
pub mod rbac;
