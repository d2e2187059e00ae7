//! Services offered by the company.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::{Validate, ValidationError};
use vitrin_core::slug::slugify;
use vitrin_core::status::PublishStatus;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::{validate_derivable_slug, validate_not_blank, validate_slug};

use crate::models::blocks::Advantage;

pub struct Service;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub status: String,
    pub sort_order: i32,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub icon_id: Option<DbId>,
    pub icon_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `service_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub advantages: Json<Vec<Advantage>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(ServiceRoot, ServiceTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub icon_id: Option<Option<DbId>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_service_content"))]
pub struct ServiceContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 250))]
    pub title: String,
    #[validate(custom(function = "validate_slug"), length(max = 120))]
    pub slug: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 200000))]
    pub content: Option<String>,
    #[serde(default)]
    #[validate(length(max = 24), nested)]
    pub advantages: Vec<Advantage>,
}

impl ServiceContent {
    pub fn resolved_slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.title))
    }
}

fn validate_service_content(content: &ServiceContent) -> Result<(), ValidationError> {
    validate_derivable_slug(content.slug.as_deref(), &content.title)
}
