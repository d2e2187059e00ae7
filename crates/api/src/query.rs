//! Shared query parameter types for API handlers.

use serde::Deserialize;
use vitrin_core::error::CoreError;
use vitrin_core::locale::Locale;
use vitrin_core::pagination::{PageRequest, SortOrder};

/// Public listing parameters (`?page=&pageSize=&sort=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Admin listing parameters (`?locale=&page=&pageSize=&includeInactive=`).
///
/// The locale selects which translation accompanies each row; it defaults
/// to the primary site locale.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListParams {
    pub locale: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(default = "default_include_inactive")]
    pub include_inactive: bool,
}

fn default_include_inactive() -> bool {
    true
}

impl AdminListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    pub fn locale(&self) -> Result<Locale, CoreError> {
        parse_optional_locale(self.locale.as_deref())
    }
}

/// Generic pagination parameters (`?page=&pageSize=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// `?locale=` for writes that create a new translated document.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleParam {
    pub locale: Option<String>,
}

impl LocaleParam {
    pub fn locale(&self) -> Result<Locale, CoreError> {
        parse_optional_locale(self.locale.as_deref())
    }
}

fn parse_optional_locale(raw: Option<&str>) -> Result<Locale, CoreError> {
    match raw {
        Some(code) => code.parse(),
        None => Ok(Locale::default()),
    }
}
