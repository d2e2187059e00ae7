//! Request handlers grouped by audience.
//!
//! - [`public`] -- cached, locale-scoped reads for the public site.
//! - [`manage`] -- role-gated admin reads and writes, generic over content type.
//! - [`files`] -- media uploads.
//! - [`users`] -- user account management.
//! - [`auth`] -- login and session introspection.

pub mod auth;
pub mod files;
pub mod manage;
pub mod public;
pub mod users;
