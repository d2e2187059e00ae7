pub mod auth;
pub mod health;
pub mod manage;
pub mod public;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                   login (public)
/// /auth/me                                      current user (requires auth)
///
/// /public/{locale}/hero|about|contact|features  singleton in one locale
/// /public/{locale}/blogs                        paginated listing + sections
/// /public/{locale}/blogs/{slug}                 detail by slug
/// /public/{locale}/services[/{slug}]            listing, detail by slug
/// /public/{locale}/certificates|partners|branches|employees|positions
/// /public/{locale}/media/photo-gallery|video-gallery
/// /public/{locale}/sections/{page_key}          section blocks of a page
///
/// /manage/{singleton}                           get (editor), delete (admin)
/// /manage/{singleton}/{locale}                  upsert (editor)
/// /manage/{collection}                          list, create (editor)
/// /manage/{collection}/{id}                     get, update shared (editor), delete (admin)
/// /manage/{collection}/{id}/content/{locale}    upsert translation (editor)
/// /manage/files                                 list, upload (editor)
/// /manage/files/{id}                            get (editor)
/// /manage/users                                 list, create (super admin)
/// /manage/users/{id}                            get, update, delete (super admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/public/{locale}", public::router())
        .nest("/manage", manage::router(config.max_upload_bytes))
}
