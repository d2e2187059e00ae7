//! Public site routes mounted at `/public/{locale}`.

use axum::routing::get;
use axum::Router;
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
use vitrin_db::models::service::Service;

use crate::handlers::public;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hero", get(public::singleton::<Hero>))
        .route("/about", get(public::singleton::<About>))
        .route("/contact", get(public::singleton::<Contact>))
        .route("/features", get(public::singleton::<Features>))
        .route("/blogs", get(public::listing::<Blog>))
        .route("/blogs/{slug}", get(public::by_slug::<Blog>))
        .route("/services", get(public::listing::<Service>))
        .route("/services/{slug}", get(public::by_slug::<Service>))
        .route("/certificates", get(public::listing::<Certificate>))
        .route("/partners", get(public::listing::<Partner>))
        .route("/branches", get(public::listing::<Branch>))
        .route("/employees", get(public::listing::<Employee>))
        .route("/positions", get(public::listing::<Position>))
        .route("/media/photo-gallery", get(public::listing::<PhotoGallery>))
        .route("/media/video-gallery", get(public::listing::<VideoGallery>))
        .route("/sections/{page_key}", get(public::sections))
}
