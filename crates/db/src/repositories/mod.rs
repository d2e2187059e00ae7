//! Repository layer.
//!
//! `UserRepo` and `FileRepo` are zero-sized structs providing async CRUD
//! methods that accept `&PgPool` as the first argument. Content types are
//! served by the generic [`DocumentRepo`](crate::document::DocumentRepo);
//! the `*_repo` modules here implement its `TranslatedDocument` contract
//! for each marker type.

pub mod about_repo;
pub mod blog_repo;
pub mod branch_repo;
pub mod certificate_repo;
pub mod contact_repo;
pub mod employee_repo;
pub mod features_repo;
pub mod file_repo;
pub mod gallery_repo;
pub mod hero_repo;
pub mod partner_repo;
pub mod position_repo;
pub mod section_repo;
pub mod service_repo;
pub mod user_repo;

pub use file_repo::FileRepo;
pub use user_repo::UserRepo;
