//! Shared response envelope types for API handlers.
//!
//! Reads use `{ "data": ... }` (plus `sections` and `paginations` for public
//! listings). Writes use the action envelope
//! `{ "success": true, "code": "SUCCESS", "message": ..., "data": ... }`.
//! Failures are rendered by [`crate::error::AppError`].

use serde::Serialize;
use vitrin_core::pagination::Paginations;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result envelope for write actions.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS",
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ActionResponse<()> {
    /// A successful action with nothing to return, such as a delete.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS",
            message: message.into(),
            data: None,
        }
    }
}

/// Public page read: the main data plus the page's auxiliary blocks.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize, X: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<X>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paginations: Option<Paginations>,
}

/// Admin listing: one page of rows plus its pagination block.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub paginations: Paginations,
}
