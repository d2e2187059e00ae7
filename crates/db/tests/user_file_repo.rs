//! Integration tests for `UserRepo` and `FileRepo`.

use sqlx::PgPool;
use vitrin_core::pagination::PageRequest;
use vitrin_db::models::file::CreateFile;
use vitrin_db::models::user::{CreateUser, UpdateUser};
use vitrin_db::repositories::{FileRepo, UserRepo};

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: "Editor".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: "CONTENT_MANAGER".to_string(),
    }
}

fn new_file(checksum: &str) -> CreateFile {
    CreateFile {
        original_name: "logo.png".to_string(),
        stored_name: format!("{checksum}.png"),
        mime_type: "image/png".to_string(),
        size_bytes: 1024,
        checksum: checksum.to_string(),
        url: format!("/uploads/{checksum}.png"),
        uploaded_by: None,
    }
}

#[sqlx::test]
async fn user_lookup_is_case_insensitive(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("editor@example.com"))
        .await
        .unwrap();
    let found = UserRepo::find_by_email(&pool, "Editor@Example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test]
async fn user_update_applies_only_given_fields(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("a@example.com")).await.unwrap();
    let updated = UserRepo::update(
        &pool,
        created.id,
        &UpdateUser {
            role: Some("ADMIN".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.role, "ADMIN");
    assert_eq!(updated.email, "a@example.com");
    assert_eq!(updated.password_hash, created.password_hash);
}

#[sqlx::test]
async fn soft_deleted_user_is_invisible(pool: PgPool) {
    let created = UserRepo::create(&pool, &new_user("gone@example.com")).await.unwrap();
    assert!(UserRepo::soft_delete(&pool, created.id).await.unwrap());
    assert!(!UserRepo::soft_delete(&pool, created.id).await.unwrap());

    assert!(UserRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(UserRepo::find_by_email(&pool, "gone@example.com")
        .await
        .unwrap()
        .is_none());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test]
async fn duplicate_upload_returns_existing_row(pool: PgPool) {
    let first = FileRepo::create(&pool, &new_file("abc123")).await.unwrap();
    let second = FileRepo::create(&pool, &new_file("abc123")).await.unwrap();
    assert_eq!(first.id, second.id);

    let by_checksum = FileRepo::find_by_checksum(&pool, "abc123").await.unwrap().unwrap();
    assert_eq!(by_checksum.id, first.id);

    let page = FileRepo::list(&pool, PageRequest::default()).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(FileRepo::count(&pool).await.unwrap(), 1);
}
