//! Contact details (singleton). Channels are shared; address text is localized.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vitrin_core::types::{DbId, DocumentId, Timestamp};
use vitrin_core::validation::validate_not_blank;

pub struct Contact;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRoot {
    pub id: DbId,
    pub document_id: DocumentId,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub map_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `contact_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactTranslation {
    pub id: DbId,
    pub document_id: DocumentId,
    pub locale: String,
    pub title: String,
    pub address: Option<String>,
    pub working_hours: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

crate::document_records!(ContactRoot, ContactTranslation);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactShared {
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub whatsapp: Option<String>,
    #[validate(url)]
    pub map_url: Option<String>,
    #[validate(url)]
    pub facebook_url: Option<String>,
    #[validate(url)]
    pub instagram_url: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub title: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 200))]
    pub working_hours: Option<String>,
}
