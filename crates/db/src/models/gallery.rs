//! Photo and video galleries (the `media/*` pages).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::status::PublishStatus;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::validate_not_blank;

// ---------------------------------------------------------------------------
// Photo gallery
// ---------------------------------------------------------------------------

pub struct PhotoGallery;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoGalleryRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub status: String,
    pub sort_order: i32,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoGalleryTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(PhotoGalleryRoot, PhotoGalleryTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhotoGalleryShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
}

// ---------------------------------------------------------------------------
// Video gallery
// ---------------------------------------------------------------------------

pub struct VideoGallery;

/// A video is either an uploaded file (`video_id`) or an external link
/// (`video_url`, e.g. YouTube).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGalleryRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub status: String,
    pub sort_order: i32,
    pub video_id: Option<DbId>,
    pub video_file_url: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_id: Option<DbId>,
    pub thumbnail_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGalleryTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(VideoGalleryRoot, VideoGalleryTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoGalleryShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub video_id: Option<Option<DbId>>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub thumbnail_id: Option<Option<DbId>>,
}

// ---------------------------------------------------------------------------
// Shared content
// ---------------------------------------------------------------------------

/// Both gallery kinds carry only a localized title.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GalleryContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 250))]
    pub title: String,
}
