//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod locale;
pub mod pagination;
pub mod roles;
pub mod slug;
pub mod status;
pub mod types;
pub mod validation;
