/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable cross-locale key shared by a root record and its translations.
pub type DocumentId = uuid::Uuid;

/// Generate a fresh document id.
///
/// UUID v7 keeps ids roughly ordered by creation time, which keeps the
/// `document_id` indexes append-mostly.
pub fn new_document_id() -> DocumentId {
    uuid::Uuid::now_v7()
}
