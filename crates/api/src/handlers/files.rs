//! Handlers for uploaded media (`/manage/files`).
//!
//! Files are content-addressed: the stored name is the SHA-256 of the bytes
//! plus an extension, so uploading the same image twice yields one file on
//! disk and one `files` row.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sha2::{Digest, Sha256};
use vitrin_core::error::CoreError;
use vitrin_core::pagination::Paginations;
use vitrin_core::types::DbId;
use vitrin_core::validation::single_field_error;
use vitrin_db::models::file::CreateFile;
use vitrin_db::repositories::FileRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::rbac::RequireEditor;
use crate::query::PaginationParams;
use crate::response::{ActionResponse, DataResponse, ListResponse};
use crate::state::AppState;

/// Accepted media types and the extension each is stored under. The
/// extension decides the `Content-Type` `/uploads` serves, so it never comes
/// from the client's file name. SVG is not accepted.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
    ("image/avif", "avif"),
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("video/quicktime", "mov"),
    ("video/ogg", "ogv"),
];

/// Stored extension for a declared content type, `None` when the type is
/// not an accepted image or video.
fn extension_for(mime: &str) -> Option<&'static str> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    MEDIA_TYPES
        .iter()
        .find(|(accepted, _)| accepted.eq_ignore_ascii_case(essence))
        .map(|(_, ext)| *ext)
}

fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// POST /api/v1/manage/files
///
/// Accepts a multipart form with a required `file` part whose type is in
/// [`MEDIA_TYPES`]. Returns 201 with the file row; identical bytes return the
/// row of the first upload.
pub async fn upload(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let mut multipart = multipart?;
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;
        upload = Some((original_name, mime, data.to_vec()));
    }

    let (original_name, mime, data) = upload
        .ok_or_else(|| AppError::Validation(single_field_error("file", "A file is required")))?;

    let Some(extension) = extension_for(&mime) else {
        return Err(AppError::Validation(single_field_error(
            "file",
            format!("Unsupported file type '{mime}'. Only images and videos are accepted"),
        )));
    };
    if data.is_empty() {
        return Err(AppError::Validation(single_field_error(
            "file",
            "The uploaded file is empty",
        )));
    }

    let checksum = sha256_hex(&data);
    if let Some(existing) = FileRepo::find_by_checksum(&state.pool, &checksum).await? {
        tracing::info!(
            file_id = existing.id,
            stored_name = %existing.stored_name,
            user_id = user.user_id,
            "Upload matched an existing file"
        );
        return Ok((
            StatusCode::CREATED,
            Json(ActionResponse::ok("File uploaded", existing)),
        ));
    }
    let stored_name = format!("{checksum}.{extension}");

    let upload_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot create upload directory: {e}")))?;

    let path = upload_dir.join(&stored_name);
    let already_stored = tokio::fs::try_exists(&path).await.unwrap_or(false);
    if !already_stored {
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot write upload: {e}")))?;
    }

    let input = CreateFile {
        original_name,
        url: format!(
            "{}/uploads/{stored_name}",
            state.config.base_url.trim_end_matches('/')
        ),
        stored_name,
        mime_type: mime,
        size_bytes: data.len() as i64,
        checksum,
        uploaded_by: Some(user.user_id),
    };
    let file = FileRepo::create(&state.pool, &input).await?;

    tracing::info!(
        file_id = file.id,
        stored_name = %file.stored_name,
        size_bytes = file.size_bytes,
        deduplicated = already_stored,
        user_id = user.user_id,
        "File uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("File uploaded", file)),
    ))
}

/// GET /api/v1/manage/files?page=&pageSize=
pub async fn list(
    _editor: RequireEditor,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request();
    let (files, total_count) = tokio::try_join!(
        FileRepo::list(&state.pool, page),
        FileRepo::count(&state.pool),
    )?;

    Ok(Json(ListResponse {
        data: files,
        paginations: Paginations::new(page, total_count),
    }))
}

/// GET /api/v1/manage/files/{id}
pub async fn get(
    _editor: RequireEditor,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let file = FileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("File", id)))?;
    Ok(Json(DataResponse { data: file }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_declared_media_type() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("IMAGE/JPEG"), Some("jpg"));
        assert_eq!(extension_for("video/mp4; codecs=avc1"), Some("mp4"));
    }

    #[test]
    fn non_media_and_scriptable_types_are_rejected() {
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for("text/html"), None);
        assert_eq!(extension_for("image/svg+xml"), None);
        assert_eq!(extension_for(""), None);
    }

    #[test]
    fn checksum_is_lowercase_hex_sha256() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
