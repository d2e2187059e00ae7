//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects callers whose role is not in
//! the action's allow-list with 403. Handlers that mutate data take one of
//! these as a parameter, so authorization runs before any database write.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitrin_core::roles::{authorize, Role, ADMINS, CONTENT_EDITORS, SUPER_ADMINS};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[Role],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if let Err(err) = authorize(user.role, allowed) {
        tracing::warn!(user_id = user.user_id, role = %user.role, "Role not allowed for action");
        return Err(err.into());
    }
    Ok(user)
}

/// Requires `SUPER_ADMIN`, `ADMIN` or `CONTENT_MANAGER`.
///
/// ```ignore
/// async fn save(RequireEditor(user): RequireEditor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, CONTENT_EDITORS).await.map(RequireEditor)
    }
}

/// Requires `SUPER_ADMIN` or `ADMIN`.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, ADMINS).await.map(RequireAdmin)
    }
}

/// Requires `SUPER_ADMIN`.
pub struct RequireSuperAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, SUPER_ADMINS).await.map(RequireSuperAdmin)
    }
}
