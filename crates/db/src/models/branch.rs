//! Company branches by country.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::status::PublishStatus;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::{validate_iso_code, validate_not_blank};

pub struct Branch;

/// A row from the `branches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub status: String,
    pub sort_order: i32,
    /// ISO 3166-1 alpha-3 (`AZE`).
    pub iso_code: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `branch_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub country_name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(BranchRoot, BranchTranslation);

/// `iso_code` is required when a branch is created.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BranchShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[validate(custom(function = "validate_iso_code"))]
    pub iso_code: Option<String>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BranchContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 120))]
    pub country_name: String,
    #[validate(length(max = 120))]
    pub city: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}
