//! Photo and video galleries.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, TranslatedDocument};
use crate::models::gallery::{
    GalleryContent, PhotoGallery, PhotoGalleryRoot, PhotoGalleryShared, PhotoGalleryTranslation,
    VideoGallery, VideoGalleryRoot, VideoGalleryShared, VideoGalleryTranslation,
};

/// Both gallery translation tables hold only a title.
async fn upsert_title(
    conn: &mut PgConnection,
    table: &str,
    document_id: DocumentId,
    locale: Locale,
    content: &GalleryContent,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "INSERT INTO {table} (document_id, locale, title)
         VALUES ($1, $2, $3)
         ON CONFLICT (document_id, locale) DO UPDATE SET
            title = EXCLUDED.title,
            is_deleted = FALSE"
    );
    sqlx::query(&query)
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Photo gallery
// ---------------------------------------------------------------------------

#[async_trait]
impl TranslatedDocument for PhotoGallery {
    const ENTITY: &'static str = "PhotoGallery";
    const TAG: &'static str = "photo-gallery";
    const ROOT_TABLE: &'static str = "photo_galleries";
    const TRANSLATION_TABLE: &'static str = "photo_gallery_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str =
        "t.id, t.document_id, t.locale, t.title, t.created_at, t.updated_at";

    type Root = PhotoGalleryRoot;
    type Translation = PhotoGalleryTranslation;
    type Shared = PhotoGalleryShared;
    type Content = GalleryContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &PhotoGalleryShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO photo_galleries (document_id, status, sort_order, image_id)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(shared.image_id.flatten())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &PhotoGalleryShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE photo_galleries SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                image_id = CASE WHEN $5 THEN $4 ELSE image_id END
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(shared.image_id.flatten())
        .bind(shared.image_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &GalleryContent,
    ) -> Result<(), sqlx::Error> {
        upsert_title(conn, Self::TRANSLATION_TABLE, document_id, locale, content).await
    }
}

impl Listed for PhotoGallery {
    const PAGE_KEY: &'static str = "photo-gallery";
}

// ---------------------------------------------------------------------------
// Video gallery
// ---------------------------------------------------------------------------

#[async_trait]
impl TranslatedDocument for VideoGallery {
    const ENTITY: &'static str = "VideoGallery";
    const TAG: &'static str = "video-gallery";
    const ROOT_TABLE: &'static str = "video_galleries";
    const TRANSLATION_TABLE: &'static str = "video_gallery_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.video_id, (SELECT f.url FROM files f WHERE f.id = r.video_id) AS video_file_url, \
        r.video_url, \
        r.thumbnail_id, (SELECT f.url FROM files f WHERE f.id = r.thumbnail_id) AS thumbnail_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str =
        "t.id, t.document_id, t.locale, t.title, t.created_at, t.updated_at";

    type Root = VideoGalleryRoot;
    type Translation = VideoGalleryTranslation;
    type Shared = VideoGalleryShared;
    type Content = GalleryContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &VideoGalleryShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO video_galleries
                (document_id, status, sort_order, video_id, video_url, thumbnail_id)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(shared.video_id.flatten())
        .bind(&shared.video_url)
        .bind(shared.thumbnail_id.flatten())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &VideoGalleryShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE video_galleries SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                video_id = CASE WHEN $7 THEN $4 ELSE video_id END,
                video_url = COALESCE($5, video_url),
                thumbnail_id = CASE WHEN $8 THEN $6 ELSE thumbnail_id END
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(shared.video_id.flatten())
        .bind(&shared.video_url)
        .bind(shared.thumbnail_id.flatten())
        .bind(shared.video_id.is_some())
        .bind(shared.thumbnail_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &GalleryContent,
    ) -> Result<(), sqlx::Error> {
        upsert_title(conn, Self::TRANSLATION_TABLE, document_id, locale, content).await
    }
}

impl Listed for VideoGallery {
    const PAGE_KEY: &'static str = "video-gallery";
}
