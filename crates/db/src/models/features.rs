//! "Why choose us" features block (singleton).

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::validate_not_blank;

use crate::models::blocks::FeatureItem;

pub struct Features;

/// A row from the `features` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `feature_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub description: Option<String>,
    pub items: Json<Vec<FeatureItem>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(FeaturesRoot, FeaturesTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesShared {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 24), nested)]
    pub items: Vec<FeatureItem>,
}
