//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a JWT Bearer token.
//! - [`rbac::RequireEditor`] -- Content editors (create, update, upload).
//! - [`rbac::RequireAdmin`] -- Admins (content deletes).
//! - [`rbac::RequireSuperAdmin`] -- User management.

pub mod auth;
pub mod rbac;
