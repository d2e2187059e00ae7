//! Row models and request DTOs.
//!
//! Each content-type submodule contains:
//! - A zero-sized marker type implementing `TranslatedDocument` (see
//!   `crate::repositories`)
//! - `FromRow` + `Serialize` structs for the root and translation rows
//! - A `Deserialize` + `Validate` DTO for shared fields (all `Option`)
//! - A `Deserialize` + `Validate` DTO for one locale's content

pub mod about;
pub mod blocks;
pub mod blog;
pub mod branch;
pub mod certificate;
pub mod contact;
pub mod employee;
pub mod features;
pub mod file;
pub mod gallery;
pub mod hero;
pub mod partner;
pub mod position;
pub mod section;
pub mod service;
pub mod user;
