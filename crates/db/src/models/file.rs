//! Uploaded media files referenced by content roots.

use serde::Serialize;
use sqlx::FromRow;
use vitrin_core::types::{DbId, Timestamp};

/// A row from the `files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: DbId,
    pub original_name: String,
    /// `<sha256>.<ext>` under the upload directory.
    pub stored_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    /// SHA-256 of the content, lower-case hex.
    pub checksum: String,
    /// Public path, e.g. `/uploads/<stored_name>`.
    pub url: String,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateFile {
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub checksum: String,
    pub url: String,
    pub uploaded_by: Option<DbId>,
}
