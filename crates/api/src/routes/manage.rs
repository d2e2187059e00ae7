//! Admin routes mounted at `/manage`.
//!
//! Each content type gets the same handler set, instantiated for its marker
//! type and mounted under its cache tag (`/manage/blogs`, `/manage/hero`).

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;
use vitrin_db::document::{Listed, TranslatedDocument};
use vitrin_db::models::about::About;
use vitrin_db::models::blog::Blog;
use vitrin_db::models::branch::Branch;
use vitrin_db::models::certificate::Certificate;
use vitrin_db::models::contact::Contact;
use vitrin_db::models::employee::Employee;
use vitrin_db::models::features::Features;
use vitrin_db::models::gallery::{PhotoGallery, VideoGallery};
use vitrin_db::models::hero::Hero;
use vitrin_db::models::partner::Partner;
use vitrin_db::models::position::Position;
use vitrin_db::models::section::{SectionContent, SectionCta};
use vitrin_db::models::service::Service;

use crate::handlers::{files, manage, users};
use crate::state::AppState;

/// Singleton routes, mounted under the type's tag.
///
/// ```text
/// GET    /{tag}           -> get_singleton
/// DELETE /{tag}           -> delete_singleton (admin)
/// PUT    /{tag}/{locale}  -> upsert_singleton
/// ```
fn singleton<D: TranslatedDocument>() -> Router<AppState> {
    let base = format!("/{}", D::TAG);
    Router::new()
        .route(
            &base,
            get(manage::get_singleton::<D>).delete(manage::delete_singleton::<D>),
        )
        .route(&format!("{base}/{{locale}}"), put(manage::upsert_singleton::<D>))
}

/// Collection routes, mounted under the type's tag.
///
/// ```text
/// GET    /{tag}                         -> list
/// POST   /{tag}?locale=                 -> create
/// GET    /{tag}/{id}                    -> get
/// PUT    /{tag}/{id}                    -> update_shared
/// DELETE /{tag}/{id}                    -> delete (admin)
/// PUT    /{tag}/{id}/content/{locale}   -> upsert_content
/// ```
fn collection<D: Listed>() -> Router<AppState> {
    let base = format!("/{}", D::TAG);
    Router::new()
        .route(&base, get(manage::list::<D>).post(manage::create::<D>))
        .route(
            &format!("{base}/{{id}}"),
            get(manage::get::<D>)
                .put(manage::update_shared::<D>)
                .delete(manage::delete::<D>),
        )
        .route(
            &format!("{base}/{{id}}/content/{{locale}}"),
            put(manage::upsert_content::<D>),
        )
}

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    let files = Router::new()
        .route("/", get(files::list).post(files::upload))
        .route("/{id}", get(files::get))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    let users = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    Router::new()
        .nest("/files", files)
        .nest("/users", users)
        // Singletons.
        .merge(singleton::<Hero>())
        .merge(singleton::<About>())
        .merge(singleton::<Contact>())
        .merge(singleton::<Features>())
        // Collections.
        .merge(collection::<Blog>())
        .merge(collection::<Service>())
        .merge(collection::<Branch>())
        .merge(collection::<Certificate>())
        .merge(collection::<Partner>())
        .merge(collection::<Position>())
        .merge(collection::<Employee>())
        .merge(collection::<PhotoGallery>())
        .merge(collection::<VideoGallery>())
        .merge(collection::<SectionContent>())
        .merge(collection::<SectionCta>())
}
