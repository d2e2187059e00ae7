//! Admin reads and writes for translated content types.
//!
//! Handlers are generic over the content type and mounted once per type by
//! [`crate::routes::manage`]. Every write:
//!
//! 1. resolves the caller and checks the action's role allow-list (the
//!    `Require*` extractor runs before the body is read),
//! 2. validates the payload and returns the field-error map on failure
//!    without touching the database,
//! 3. performs the write in one transaction,
//! 4. invalidates the content type's cache tag.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;
use vitrin_core::error::CoreError;
use vitrin_core::locale::Locale;
use vitrin_core::pagination::Paginations;
use vitrin_core::types::DbId;
use vitrin_core::validation::{field_error_map, FieldErrors};
use vitrin_db::document::{DocumentRepo, Listed, RootRecord, TranslatedDocument};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::query::{AdminListParams, LocaleParam};
use crate::response::{ActionResponse, DataResponse, ListResponse};
use crate::state::AppState;

/// Shared and localized fields submitted together as one JSON object.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned, C: DeserializeOwned"))]
pub struct Payload<S, C> {
    #[serde(flatten)]
    pub shared: S,
    #[serde(flatten)]
    pub content: C,
}

fn errors_of<T: Validate>(value: &T) -> FieldErrors {
    match value.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_error_map(&errors),
    }
}

fn merge(into: &mut FieldErrors, other: FieldErrors) {
    for (field, messages) in other {
        into.entry(field).or_default().extend(messages);
    }
}

fn reject_if_any(errors: FieldErrors) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Validate a full payload. `creating` adds the insert-only checks.
fn validate_payload<D: TranslatedDocument>(
    payload: &Payload<D::Shared, D::Content>,
    creating: bool,
) -> AppResult<()> {
    let mut errors = errors_of(&payload.shared);
    merge(&mut errors, errors_of(&payload.content));
    if creating {
        merge(&mut errors, D::creation_errors(&payload.shared));
    }
    reject_if_any(errors)
}

fn not_found(entity: &'static str, key: impl std::fmt::Display) -> AppError {
    AppError::Core(CoreError::not_found(entity, key))
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

/// GET /api/v1/manage/{singleton}
///
/// The singleton with every translation, or `null` before the first save.
pub async fn get_singleton<D: TranslatedDocument>(
    _editor: RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let view = DocumentRepo::<D>::get_singleton(&state.pool).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/manage/{singleton}/{locale}
///
/// Create the singleton on first save, otherwise update it, and upsert the
/// `locale` translation.
pub async fn upsert_singleton<D: TranslatedDocument>(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    AppPath(locale): AppPath<String>,
    AppJson(payload): AppJson<Payload<D::Shared, D::Content>>,
) -> AppResult<impl IntoResponse> {
    let locale: Locale = locale.parse()?;
    validate_payload::<D>(&payload, false)?;

    let view =
        DocumentRepo::<D>::upsert_singleton(&state.pool, locale, &payload.shared, &payload.content)
            .await?;
    state.cache.invalidate(D::TAG);

    tracing::info!(
        entity = D::ENTITY,
        locale = %locale,
        user_id = user.user_id,
        "Singleton saved"
    );

    Ok(Json(ActionResponse::ok(
        format!("{} saved", D::ENTITY),
        view,
    )))
}

/// DELETE /api/v1/manage/{singleton}
pub async fn delete_singleton<D: TranslatedDocument>(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if !DocumentRepo::<D>::soft_delete_singleton(&state.pool).await? {
        return Err(not_found(D::ENTITY, "singleton"));
    }
    state.cache.invalidate(D::TAG);

    tracing::info!(entity = D::ENTITY, user_id = user.user_id, "Singleton deleted");

    Ok(Json(ActionResponse::done(format!("{} deleted", D::ENTITY))))
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// GET /api/v1/manage/{collection}?locale=&page=&pageSize=&includeInactive=
pub async fn list<D: Listed>(
    _editor: RequireEditor,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<AdminListParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale()?;
    let page = params.page_request();
    let include_inactive = params.include_inactive;

    let (items, total_count) = tokio::try_join!(
        DocumentRepo::<D>::list_admin(&state.pool, locale, page, include_inactive),
        DocumentRepo::<D>::count_admin(&state.pool, include_inactive),
    )?;

    Ok(Json(ListResponse {
        data: items,
        paginations: Paginations::new(page, total_count),
    }))
}

/// POST /api/v1/manage/{collection}?locale=
///
/// Create a document with its first translation. Returns 201.
pub async fn create<D: Listed>(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LocaleParam>,
    AppJson(payload): AppJson<Payload<D::Shared, D::Content>>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale()?;
    validate_payload::<D>(&payload, true)?;

    let view =
        DocumentRepo::<D>::create(&state.pool, locale, &payload.shared, &payload.content).await?;
    state.cache.invalidate(D::TAG);

    tracing::info!(
        entity = D::ENTITY,
        id = view.root.id(),
        locale = %locale,
        user_id = user.user_id,
        "Document created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok(format!("{} created", D::ENTITY), view)),
    ))
}

/// GET /api/v1/manage/{collection}/{id}
pub async fn get<D: Listed>(
    _editor: RequireEditor,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = DocumentRepo::<D>::get(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(D::ENTITY, id))?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/manage/{collection}/{id}
///
/// Update the locale-independent fields (status, ordering, media).
pub async fn update_shared<D: Listed>(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(shared): AppJson<D::Shared>,
) -> AppResult<impl IntoResponse> {
    reject_if_any(errors_of(&shared))?;

    let view = DocumentRepo::<D>::update_shared(&state.pool, id, &shared)
        .await?
        .ok_or_else(|| not_found(D::ENTITY, id))?;
    state.cache.invalidate(D::TAG);

    tracing::info!(entity = D::ENTITY, id, user_id = user.user_id, "Document updated");

    Ok(Json(ActionResponse::ok(
        format!("{} updated", D::ENTITY),
        view,
    )))
}

/// PUT /api/v1/manage/{collection}/{id}/content/{locale}
///
/// Insert or replace the `locale` translation of an existing document.
pub async fn upsert_content<D: Listed>(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    AppPath((id, locale)): AppPath<(DbId, String)>,
    AppJson(content): AppJson<D::Content>,
) -> AppResult<impl IntoResponse> {
    let locale: Locale = locale.parse()?;
    reject_if_any(errors_of(&content))?;

    let view = DocumentRepo::<D>::upsert_content(&state.pool, id, locale, &content)
        .await?
        .ok_or_else(|| not_found(D::ENTITY, id))?;
    state.cache.invalidate(D::TAG);

    tracing::info!(
        entity = D::ENTITY,
        id,
        locale = %locale,
        user_id = user.user_id,
        "Translation saved"
    );

    Ok(Json(ActionResponse::ok(
        format!("{} translation saved", D::ENTITY),
        view,
    )))
}

/// DELETE /api/v1/manage/{collection}/{id}
///
/// Soft-delete the document and all of its translations.
pub async fn delete<D: Listed>(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !DocumentRepo::<D>::soft_delete(&state.pool, id).await? {
        return Err(not_found(D::ENTITY, id));
    }
    state.cache.invalidate(D::TAG);

    tracing::info!(entity = D::ENTITY, id, user_id = user.user_id, "Document deleted");

    Ok(Json(ActionResponse::done(format!("{} deleted", D::ENTITY))))
}
