//! HTTP-level integration tests for the manage and public content APIs.
//!
//! Covers the singleton upsert, validation and role failures leaving the
//! database untouched, public pagination, the branch round-trip, section
//! blocks next to listings, and cache invalidation after writes.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, put_json, put_json_auth, token_for,
};
use serde_json::json;
use sqlx::PgPool;
use vitrin_core::roles::Role;

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn singleton_upsert_in_two_locales_keeps_one_root(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool.clone());

    let response = put_json_auth(
        app.clone(),
        "/api/v1/manage/hero/az",
        &token,
        json!({ "title": "Xoş gəlmisiniz", "buttonUrl": "/contact" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["code"], "SUCCESS");

    let response = put_json_auth(
        app.clone(),
        "/api/v1/manage/hero/en",
        &token,
        json!({ "title": "Welcome" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(count(&pool, "heroes").await, 1);
    assert_eq!(count(&pool, "hero_translations").await, 2);

    let json = body_json(get_auth(app, "/api/v1/manage/hero", &token).await).await;
    let translations = json["data"]["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 2);
    // Shared fields omitted on the second save are kept.
    assert_eq!(json["data"]["buttonUrl"], "/contact");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_first_singleton_saves_create_one_root(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool.clone());

    let (az, en) = tokio::join!(
        put_json_auth(
            app.clone(),
            "/api/v1/manage/hero/az",
            &token,
            json!({ "title": "Xoş gəlmisiniz" }),
        ),
        put_json_auth(
            app.clone(),
            "/api/v1/manage/hero/en",
            &token,
            json!({ "title": "Welcome" }),
        ),
    );
    assert_eq!(az.status(), StatusCode::OK);
    assert_eq!(en.status(), StatusCode::OK);

    assert_eq!(count(&pool, "heroes").await, 1);
    assert_eq!(count(&pool, "hero_translations").await, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn null_media_id_clears_the_reference(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool.clone());
    let video_id: i64 = sqlx::query_scalar(
        "INSERT INTO files (original_name, stored_name, mime_type, size_bytes, checksum, url)
         VALUES ('intro.mp4', 'ff00.mp4', 'video/mp4', 10, 'ff00', '/uploads/ff00.mp4')
         RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    put_json_auth(
        app.clone(),
        "/api/v1/manage/hero/en",
        &token,
        json!({ "title": "Welcome", "videoId": video_id }),
    )
    .await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/manage/hero/az",
        &token,
        json!({ "title": "Xoş gəlmisiniz" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["videoId"], video_id);
    assert_eq!(json["data"]["videoUrl"], "/uploads/ff00.mp4");

    let response = put_json_auth(
        app,
        "/api/v1/manage/hero/en",
        &token,
        json!({ "title": "Welcome", "videoId": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["videoId"].is_null());
    assert!(json["data"]["videoUrl"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_payload_returns_field_errors_without_writing(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool.clone());

    let response = put_json_auth(
        app,
        "/api/v1/manage/hero/az",
        &token,
        json!({ "title": "   ", "description": "No title" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(!json["errors"]["title"].as_array().unwrap().is_empty());

    assert_eq!(count(&pool, "heroes").await, 0);
    assert_eq!(count(&pool, "hero_translations").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_is_unauthorized_and_writes_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = put_json(app, "/api/v1/manage/about/az", json!({ "title": "About" })).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(count(&pool, "abouts").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn role_outside_allow_list_is_rejected_and_writes_nothing(pool: PgPool) {
    let token = token_for(&pool, "visitor@vitrin.test", Role::User).await;
    let app = common::build_test_app(pool.clone());

    let response = put_json_auth(
        app,
        "/api/v1/manage/contact/az",
        &token,
        json!({ "title": "Contact" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(count(&pool, "contacts").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn content_manager_cannot_delete(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/partners?locale=az",
        &token,
        json!({ "name": "Acme" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete_auth(app, &format!("/api/v1/manage/partners/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let live: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM partners WHERE is_deleted = FALSE")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(live, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_singleton_requires_the_requested_locale(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    put_json_auth(
        app.clone(),
        "/api/v1/manage/about/az",
        &token,
        json!({ "title": "Haqqımızda" }),
    )
    .await;

    let response = get(app.clone(), "/api/v1/public/az/about").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["translation"]["title"], "Haqqımızda");

    let response = get(app, "/api/v1/public/ru/about").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsupported_locale_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/public/de/blogs").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn public_listing_pages_and_reports_total_pages(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    for n in 1..=15 {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/manage/blogs?locale=az",
            &token,
            json!({ "title": format!("Xəbər {n}"), "slug": format!("xeber-{n}") }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app.clone(), "/api/v1/public/az/blogs?page=1&pageSize=12").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 12);
    assert_eq!(json["paginations"]["totalCount"], 15);
    assert_eq!(json["paginations"]["totalPages"], 2);

    let json = body_json(get(app.clone(), "/api/v1/public/az/blogs?page=2&pageSize=12").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    // No English translations exist yet.
    let json = body_json(get(app, "/api/v1/public/en/blogs").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["paginations"]["totalPages"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn branch_round_trips_through_the_public_listing(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/branches?locale=az",
        &token,
        json!({ "isoCode": "AZE", "countryName": "Azerbaijan", "status": "ACTIVE" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app, "/api/v1/public/az/branches").await).await;
    let branch = &json["data"][0];
    assert_eq!(branch["isoCode"], "AZE");
    assert_eq!(branch["status"], "ACTIVE");
    assert_eq!(branch["translation"]["countryName"], "Azerbaijan");
    assert_eq!(branch["translation"]["locale"], "az");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn branch_without_iso_code_is_rejected_on_create(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/v1/manage/branches?locale=az",
        &token,
        json!({ "countryName": "Georgia" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["iso_code"].is_array());
    assert_eq!(count(&pool, "branches").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn translation_edit_adds_a_locale_and_slug_detail_resolves(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/services?locale=az",
        &token,
        json!({ "title": "Mühəndislik", "slug": "muhendislik" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/manage/services/{id}/content/en"),
        &token,
        json!({ "title": "Engineering", "slug": "engineering" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["translations"].as_array().unwrap().len(), 2);

    let json = body_json(get(app.clone(), "/api/v1/public/en/services/engineering").await).await;
    assert_eq!(json["data"]["translation"]["title"], "Engineering");

    let response = get(app, "/api/v1/public/en/services/muhendislik").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upsert_content_on_missing_document_is_not_found(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/manage/certificates/9999/content/az",
        &token,
        json!({ "title": "ISO 9001" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_carries_section_blocks_and_contact(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    post_json_auth(
        app.clone(),
        "/api/v1/manage/section-ctas?locale=az",
        &token,
        json!({ "pageKey": "partners", "title": "Tərəfdaş olun" }),
    )
    .await;
    put_json_auth(
        app.clone(),
        "/api/v1/manage/contact/az",
        &token,
        json!({ "title": "Əlaqə", "email": "info@vitrin.az" }),
    )
    .await;

    let json = body_json(get(app, "/api/v1/public/az/partners").await).await;
    assert_eq!(json["sections"]["cta"]["translation"]["title"], "Tərəfdaş olun");
    assert!(json["sections"]["content"].is_null());
    assert_eq!(json["sections"]["contact"]["email"], "info@vitrin.az");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleted_document_disappears_from_public_reads(pool: PgPool) {
    let token = token_for(&pool, "admin@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/positions?locale=az",
        &token,
        json!({ "name": "Mühəndis" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let json = body_json(get(app.clone(), "/api/v1/public/az/positions").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(app.clone(), &format!("/api/v1/manage/positions/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app.clone(), "/api/v1/public/az/positions").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    let response = get_auth(app, &format!("/api/v1/manage/positions/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn public_read_reflects_the_latest_write(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool.clone());

    put_json_auth(
        app.clone(),
        "/api/v1/manage/features/en",
        &token,
        json!({ "title": "Old title" }),
    )
    .await;
    let json = body_json(get(app.clone(), "/api/v1/public/en/features").await).await;
    assert_eq!(json["data"]["translation"]["title"], "Old title");

    // A write that bypasses the API is invisible until the tag is invalidated.
    sqlx::query("UPDATE feature_translations SET title = 'Direct write'")
        .execute(&pool)
        .await
        .unwrap();
    let json = body_json(get(app.clone(), "/api/v1/public/en/features").await).await;
    assert_eq!(json["data"]["translation"]["title"], "Old title");

    put_json_auth(
        app.clone(),
        "/api/v1/manage/features/en",
        &token,
        json!({ "title": "New title" }),
    )
    .await;
    let json = body_json(get(app, "/api/v1/public/en/features").await).await;
    assert_eq!(json["data"]["translation"]["title"], "New title");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employee_listing_carries_position_names_and_follows_position_edits(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/positions?locale=en",
        &token,
        json!({ "name": "Engineer" }),
    )
    .await;
    let position_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/employees?locale=en",
        &token,
        json!({ "fullName": "Aysel Mammadova", "positionId": position_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(app.clone(), "/api/v1/public/en/employees").await).await;
    assert_eq!(json["data"][0]["positionId"], position_id);
    assert_eq!(json["data"][0]["positionNames"]["en"], "Engineer");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/manage/positions/{position_id}/content/en"),
        &token,
        json!({ "name": "Lead engineer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(app, "/api/v1/public/en/employees").await).await;
    assert_eq!(json["data"][0]["positionNames"]["en"], "Lead engineer");
}
