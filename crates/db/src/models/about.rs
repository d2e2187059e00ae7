//! About page content (singleton) with its statistics strip.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::validate_not_blank;

use crate::models::blocks::Statistic;

pub struct About;

/// A row from the `abouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub video_id: Option<DbId>,
    pub video_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `about_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub description: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub statistics: Json<Vec<Statistic>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(AboutRoot, AboutTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutShared {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub video_id: Option<Option<DbId>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub title: String,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    #[validate(length(max = 5000))]
    pub mission: Option<String>,
    #[validate(length(max = 5000))]
    pub vision: Option<String>,
    #[serde(default)]
    #[validate(length(max = 12), nested)]
    pub statistics: Vec<Statistic>,
}
