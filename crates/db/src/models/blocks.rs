//! Structured JSON sub-fields stored in JSONB translation columns.

use serde::{Deserialize, Serialize};
use validator::Validate;
use vitrin_core::validation::validate_not_blank;

/// A headline number on the About page (`"15+"`, `"Years of experience"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 32))]
    pub value: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 120))]
    pub label: String,
}

/// One entry of the Features block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeatureItem {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Icon identifier understood by the front-end.
    #[validate(length(max = 64))]
    pub icon: Option<String>,
}

/// One advantage bullet on a Service page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Advantage {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
