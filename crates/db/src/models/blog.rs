//! Blog posts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};
use vitrin_core::slug::slugify;
use vitrin_core::status::PublishStatus;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::{validate_derivable_slug, validate_not_blank, validate_slug};

pub struct Blog;

/// A row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub status: String,
    pub sort_order: i32,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub published_at: Option<Timestamp>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `blog_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(BlogRoot, BlogTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
    pub published_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_blog_content"))]
pub struct BlogContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 250))]
    pub title: String,
    /// Derived from the title when omitted.
    #[validate(custom(function = "validate_slug"), length(max = 120))]
    pub slug: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 200000))]
    pub content: Option<String>,
}

impl BlogContent {
    pub fn resolved_slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.title))
    }
}

fn validate_blog_content(content: &BlogContent) -> Result<(), ValidationError> {
    validate_derivable_slug(content.slug.as_deref(), &content.title)
}
