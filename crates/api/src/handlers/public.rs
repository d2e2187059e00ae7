//! Public site reads.
//!
//! Every handler here is generic over a content type and cached in the
//! [`TagCache`](crate::cache::TagCache) under that type's tag, so a write to
//! the type through the manage API makes the next read fresh.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use vitrin_core::error::CoreError;
use vitrin_core::locale::Locale;
use vitrin_core::pagination::Paginations;
use vitrin_db::document::{DocumentRepo, Listed, LocalizedDocument, Sluggable, TranslatedDocument};
use vitrin_db::models::contact::Contact;
use vitrin_db::models::section::{SectionContent, SectionCta};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::query::ListParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Auxiliary blocks rendered around a public listing.
#[derive(Serialize)]
pub struct PageSections {
    pub content: Option<LocalizedDocument<SectionContent>>,
    pub cta: Option<LocalizedDocument<SectionCta>>,
    pub contact: Option<LocalizedDocument<Contact>>,
}

fn to_value<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Response serialization failed: {e}")))
}

fn not_found(entity: &'static str, key: impl std::fmt::Display) -> AppError {
    AppError::Core(CoreError::not_found(entity, key))
}

/// Cache tags for a read of `D` (including [`TranslatedDocument::RELATED_TAGS`])
/// plus `extra`.
fn tags_of<D: TranslatedDocument>(extra: &[&'static str]) -> Vec<&'static str> {
    let mut tags = vec![D::TAG];
    tags.extend_from_slice(D::RELATED_TAGS);
    tags.extend_from_slice(extra);
    tags
}

/// GET /api/v1/public/{locale}/{singleton}
///
/// The singleton root with its `locale` translation.
pub async fn singleton<D: TranslatedDocument>(
    State(state): State<AppState>,
    AppPath(locale): AppPath<String>,
) -> AppResult<Json<Value>> {
    let locale: Locale = locale.parse()?;
    let name = format!("{}:{locale}", D::TAG);
    let pool = &state.pool;

    let body = state
        .cache
        .get_or_load(&name, &tags_of::<D>(&[]), move || async move {
            let document = DocumentRepo::<D>::find_localized_singleton(pool, locale)
                .await?
                .ok_or_else(|| not_found(D::ENTITY, locale))?;
            to_value(&DataResponse { data: document })
        })
        .await?;

    Ok(Json(body))
}

/// GET /api/v1/public/{locale}/{collection}?page=&pageSize=&sort=
///
/// One page of the collection plus the page's section blocks and the
/// contact singleton, fetched concurrently.
pub async fn listing<D: Listed>(
    State(state): State<AppState>,
    AppPath(locale): AppPath<String>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<Json<Value>> {
    let locale: Locale = locale.parse()?;
    let page = params.page_request();
    let sort = params.sort;
    let name = format!(
        "{}:list:{locale}:{}:{}:{}",
        D::TAG,
        page.page,
        page.page_size,
        sort.as_sql()
    );
    let tags = tags_of::<D>(&[SectionContent::TAG, SectionCta::TAG, Contact::TAG]);
    let pool = &state.pool;

    let body = state
        .cache
        .get_or_load(&name, &tags, move || async move {
            let (items, total_count, content, cta, contact) = tokio::try_join!(
                DocumentRepo::<D>::list_public(pool, locale, page, sort),
                DocumentRepo::<D>::count_public(pool, locale),
                DocumentRepo::<SectionContent>::find_public_by_page_key(pool, locale, D::PAGE_KEY),
                DocumentRepo::<SectionCta>::find_public_by_page_key(pool, locale, D::PAGE_KEY),
                DocumentRepo::<Contact>::find_localized_singleton(pool, locale),
            )?;

            to_value(&PageResponse {
                data: items,
                sections: Some(PageSections {
                    content,
                    cta,
                    contact,
                }),
                paginations: Some(Paginations::new(page, total_count)),
            })
        })
        .await?;

    Ok(Json(body))
}

/// GET /api/v1/public/{locale}/{collection}/{slug}
pub async fn by_slug<D: Sluggable>(
    State(state): State<AppState>,
    AppPath((locale, slug)): AppPath<(String, String)>,
) -> AppResult<Json<Value>> {
    let locale: Locale = locale.parse()?;
    let name = format!("{}:slug:{locale}:{slug}", D::TAG);
    let pool = &state.pool;
    let slug = slug.as_str();

    let body = state
        .cache
        .get_or_load(&name, &tags_of::<D>(&[]), move || async move {
            let document = DocumentRepo::<D>::find_public_by_slug(pool, locale, slug)
                .await?
                .ok_or_else(|| not_found(D::ENTITY, slug))?;
            to_value(&DataResponse { data: document })
        })
        .await?;

    Ok(Json(body))
}

/// Section blocks for a page key, exposed for pages that are not listings.
///
/// GET /api/v1/public/{locale}/sections/{page_key}
pub async fn sections(
    State(state): State<AppState>,
    AppPath((locale, page_key)): AppPath<(String, String)>,
) -> AppResult<Json<Value>> {
    let locale: Locale = locale.parse()?;
    let name = format!("sections:{locale}:{page_key}");
    let tags = [SectionContent::TAG, SectionCta::TAG];
    let pool = &state.pool;
    let page_key = page_key.as_str();

    let body = state
        .cache
        .get_or_load(&name, &tags, move || async move {
            let (content, cta) = tokio::try_join!(
                DocumentRepo::<SectionContent>::find_public_by_page_key(pool, locale, page_key),
                DocumentRepo::<SectionCta>::find_public_by_page_key(pool, locale, page_key),
            )?;
            to_value(&DataResponse {
                data: SectionPair { content, cta },
            })
        })
        .await?;

    Ok(Json(body))
}

#[derive(Serialize)]
struct SectionPair {
    content: Option<LocalizedDocument<SectionContent>>,
    cta: Option<LocalizedDocument<SectionCta>>,
}
