//! Repository for the `files` table.

use sqlx::PgPool;
use vitrin_core::pagination::PageRequest;
use vitrin_core::types::DbId;

use crate::models::file::{CreateFile, FileRecord};

const COLUMNS: &str = "id, original_name, stored_name, mime_type, size_bytes, checksum, \
                       url, uploaded_by, created_at";

pub struct FileRepo;

impl FileRepo {
    /// Insert a file row. Uploading identical bytes twice yields the same
    /// `stored_name`; the existing row is returned in that case.
    pub async fn create(pool: &PgPool, input: &CreateFile) -> Result<FileRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO files
                (original_name, stored_name, mime_type, size_bytes, checksum, url, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (stored_name) DO UPDATE SET stored_name = EXCLUDED.stored_name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileRecord>(&query)
            .bind(&input.original_name)
            .bind(&input.stored_name)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(&input.checksum)
            .bind(&input.url)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FileRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files WHERE id = $1");
        sqlx::query_as::<_, FileRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an earlier upload with the same SHA-256.
    pub async fn find_by_checksum(
        pool: &PgPool,
        checksum: &str,
    ) -> Result<Option<FileRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files WHERE checksum = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, FileRecord>(&query)
            .bind(checksum)
            .fetch_optional(pool)
            .await
    }

    /// One page of files, newest first.
    pub async fn list(pool: &PgPool, page: PageRequest) -> Result<Vec<FileRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM files ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, FileRecord>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(pool)
            .await
    }
}
