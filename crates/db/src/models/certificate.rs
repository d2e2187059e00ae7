//! Certificates and accreditations.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::status::PublishStatus;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::validate_not_blank;

pub struct Certificate;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRoot {
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
pub struct CertificateTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(CertificateRoot, CertificateTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificateShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificateContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 250))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
