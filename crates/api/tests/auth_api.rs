//! HTTP-level integration tests for login, the current-user endpoint,
//! user management and media uploads.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, delete_auth, get, get_auth, post_json, post_json_auth, post_raw_auth,
    put_json_auth, token_for, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use vitrin_core::roles::Role;
use vitrin_db::models::user::UpdateUser;
use vitrin_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let user = create_user(&pool, "admin@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "Admin@Vitrin.test", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["accessToken"].is_string());
    assert_eq!(json["expiresIn"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "ADMIN");
    assert!(json["user"].get("passwordHash").is_none());

    let token = json["accessToken"].as_str().unwrap();
    let me = body_json(get_auth(app, "/api/v1/auth/me", token).await).await;
    assert_eq!(me["data"]["email"], "admin@vitrin.test");

    let refreshed = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(refreshed.last_login_at.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    create_user(&pool, "admin@vitrin.test", Role::Admin).await;
    let app = common::build_test_app(pool);

    let wrong = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "admin@vitrin.test", "password": "not-the-password" }),
    )
    .await;
    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "ghost@vitrin.test", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await["message"], body_json(unknown).await["message"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_user_token_stops_working(pool: PgPool) {
    let user = create_user(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool.clone());

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "editor@vitrin.test", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let token = login["accessToken"].as_str().unwrap().to_string();

    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_json_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/login", json!({ "email": 42 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn super_admin_manages_users(pool: PgPool) {
    let token = token_for(&pool, "root@vitrin.test", Role::SuperAdmin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/users",
        &token,
        json!({
            "email": "New.Editor@Vitrin.test",
            "name": "New Editor",
            "password": "long-enough-password",
            "role": "CONTENT_MANAGER"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["email"], "new.editor@vitrin.test");
    let id = created["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/manage/users/{id}"),
        &token,
        json!({ "role": "ADMIN" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "ADMIN");

    let list = body_json(get_auth(app.clone(), "/api/v1/manage/users", &token).await).await;
    assert_eq!(list["paginations"]["totalCount"], 2);

    let response = delete_auth(app.clone(), &format!("/api/v1/manage/users/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/api/v1/manage/users/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_password_and_bad_email_are_field_errors(pool: PgPool) {
    let token = token_for(&pool, "root@vitrin.test", Role::SuperAdmin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/manage/users",
        &token,
        json!({ "email": "not-an-email", "name": "X", "password": "long-enough", "role": "ADMIN" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["email"].is_array());

    let response = post_json_auth(
        app,
        "/api/v1/manage/users",
        &token,
        json!({ "email": "a@vitrin.test", "name": "X", "password": "short", "role": "ADMIN" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["password"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_is_a_conflict(pool: PgPool) {
    let token = token_for(&pool, "root@vitrin.test", Role::SuperAdmin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/manage/users",
        &token,
        json!({
            "email": "root@vitrin.test",
            "name": "Again",
            "password": "long-enough-password",
            "role": "ADMIN"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_manage_users_and_no_one_deletes_themselves(pool: PgPool) {
    let admin_token = token_for(&pool, "admin@vitrin.test", Role::Admin).await;
    let root = create_user(&pool, "root@vitrin.test", Role::SuperAdmin).await;
    let root_token = vitrin_api::auth::jwt::generate_access_token(
        root.id,
        "SUPER_ADMIN",
        &common::test_config().jwt,
    )
    .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/manage/users", &admin_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &format!("/api/v1/manage/users/{}", root.id), &root_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

fn multipart_body(boundary: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_stores_content_addressed_file_once(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let (app, state) = common::build_test_app_with_state(pool.clone());
    let boundary = "vitrin-boundary";
    let content_type = format!("multipart/form-data; boundary={boundary}");
    let body = multipart_body(boundary, "Logo.PNG", "image/png", b"not really a png");

    let first = post_raw_auth(
        app.clone(),
        "/api/v1/manage/files",
        &token,
        &content_type,
        body.clone(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;
    let stored_name = first["data"]["storedName"].as_str().unwrap().to_string();
    assert!(stored_name.ends_with(".png"));
    assert_eq!(
        first["data"]["url"],
        format!("http://localhost:3000/uploads/{stored_name}")
    );
    assert!(common::upload_dir(&state).join(&stored_name).exists());

    let second =
        post_raw_auth(app, "/api/v1/manage/files", &token, &content_type, body).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    assert_eq!(body_json(second).await["data"]["id"], first["data"]["id"]);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_rejects_non_media_types(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool);
    let boundary = "vitrin-boundary";
    let body = multipart_body(boundary, "notes.pdf", "application/pdf", b"%PDF-1.4");

    let response = post_raw_auth(
        app,
        "/api/v1/manage/files",
        &token,
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["file"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_extension_comes_from_media_type_not_file_name(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let (app, state) = common::build_test_app_with_state(pool);
    let boundary = "vitrin-boundary";
    let body = multipart_body(boundary, "evil.html", "image/png", b"<script>alert(1)</script>");

    let response = post_raw_auth(
        app,
        "/api/v1/manage/files",
        &token,
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let stored_name = json["data"]["storedName"].as_str().unwrap().to_string();
    assert!(stored_name.ends_with(".png"), "stored as {stored_name}");
    assert_eq!(json["data"]["originalName"], "evil.html");
    assert!(common::upload_dir(&state).join(&stored_name).exists());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_rejects_svg(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let app = common::build_test_app(pool);
    let boundary = "vitrin-boundary";
    let body = multipart_body(boundary, "logo.svg", "image/svg+xml", b"<svg/>");

    let response = post_raw_auth(
        app,
        "/api/v1/manage/files",
        &token,
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["file"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn identical_bytes_under_different_names_share_one_file(pool: PgPool) {
    let token = token_for(&pool, "editor@vitrin.test", Role::ContentManager).await;
    let (app, state) = common::build_test_app_with_state(pool.clone());
    let boundary = "vitrin-boundary";
    let content_type = format!("multipart/form-data; boundary={boundary}");
    let bytes = b"same photo bytes";

    let first = post_raw_auth(
        app.clone(),
        "/api/v1/manage/files",
        &token,
        &content_type,
        multipart_body(boundary, "a.jpg", "image/jpeg", bytes),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;

    let second = post_raw_auth(
        app,
        "/api/v1/manage/files",
        &token,
        &content_type,
        multipart_body(boundary, "a.jpeg", "image/png", bytes),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second = body_json(second).await;

    assert_eq!(second["data"]["id"], first["data"]["id"]);
    assert_eq!(second["data"]["storedName"], first["data"]["storedName"]);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let stored = std::fs::read_dir(common::upload_dir(&state)).unwrap().count();
    assert_eq!(stored, 1);
}
