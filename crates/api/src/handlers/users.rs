//! Handlers for `/manage/users` (user management).
//!
//! All handlers require the `SUPER_ADMIN` role via [`RequireSuperAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use vitrin_core::error::CoreError;
use vitrin_core::pagination::Paginations;
use vitrin_core::roles::Role;
use vitrin_core::types::DbId;
use vitrin_core::validation::{field_error_map, single_field_error, validate_not_blank};
use vitrin_db::models::user::{CreateUser, UpdateUser, UserResponse};
use vitrin_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireSuperAdmin;
use crate::query::PaginationParams;
use crate::response::{ActionResponse, DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /manage/users`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(custom(function = "validate_not_blank"), length(max = 120))]
    pub name: String,
    pub password: String,
    pub role: Role,
}

/// Request body for `PUT /manage/users/{id}`. Omitted fields are unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_not_blank"), length(max = 120))]
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

fn hash_checked(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Validation(single_field_error("password", msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

fn validated<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|errors| AppError::Validation(field_error_map(&errors)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/manage/users?page=&pageSize=
pub async fn list_users(
    _admin: RequireSuperAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request();
    let (users, total_count) = tokio::try_join!(
        UserRepo::list(&state.pool, page),
        UserRepo::count(&state.pool),
    )?;

    Ok(Json(ListResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
        paginations: Paginations::new(page, total_count),
    }))
}

/// GET /api/v1/manage/users/{id}
pub async fn get_user(
    _admin: RequireSuperAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// POST /api/v1/manage/users
///
/// Create a user. The email is stored lower-cased. Returns 201.
pub async fn create_user(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    validated(&input)?;
    let password_hash = hash_checked(&input.password)?;

    let dto = CreateUser {
        email: input.email.trim().to_lowercase(),
        name: input.name.trim().to_string(),
        password_hash,
        role: input.role.as_str().to_string(),
    };
    let user = UserRepo::create(&state.pool, &dto).await?;

    tracing::info!(user_id = user.id, role = %user.role, by = admin.user_id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("User created", UserResponse::from(user))),
    ))
}

/// PUT /api/v1/manage/users/{id}
///
/// Update profile fields, role, activation or password.
pub async fn update_user(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    validated(&input)?;
    if id == admin.user_id && input.is_active == Some(false) {
        return Err(AppError::Validation(single_field_error(
            "is_active",
            "You cannot deactivate your own account",
        )));
    }
    let password_hash = input.password.as_deref().map(hash_checked).transpose()?;

    let dto = UpdateUser {
        email: input.email.map(|e| e.trim().to_lowercase()),
        name: input.name.map(|n| n.trim().to_string()),
        password_hash,
        role: input.role.map(|r| r.as_str().to_string()),
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", id)))?;

    tracing::info!(user_id = id, by = admin.user_id, "User updated");

    Ok(Json(ActionResponse::ok("User updated", UserResponse::from(user))))
}

/// DELETE /api/v1/manage/users/{id}
///
/// Soft-delete a user. A super admin cannot delete their own account.
pub async fn delete_user(
    RequireSuperAdmin(admin): RequireSuperAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot delete your own account".into(),
        )));
    }
    if !UserRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("User", id)));
    }

    tracing::info!(user_id = id, by = admin.user_id, "User deleted");

    Ok(Json(ActionResponse::done("User deleted")))
}
