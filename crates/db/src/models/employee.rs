//! Team members.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::status::PublishStatus;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::validate_not_blank;

pub struct Employee;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub status: String,
    pub sort_order: i32,
    pub image_id: Option<DbId>,
    pub image_url: Option<String>,
    pub position_id: Option<DbId>,
    /// Live position name per locale, `None` without a position.
    pub position_names: Option<Json<BTreeMap<String, String>>>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(EmployeeRoot, EmployeeTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeShared {
    pub status: Option<PublishStatus>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image_id: Option<Option<DbId>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub position_id: Option<Option<DbId>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub full_name: String,
    #[validate(length(max = 5000))]
    pub bio: Option<String>,
}
