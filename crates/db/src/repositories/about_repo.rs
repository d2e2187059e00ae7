//! About singleton: `abouts` + `about_translations`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::TranslatedDocument;
use crate::models::about::{About, AboutContent, AboutRoot, AboutShared, AboutTranslation};

#[async_trait]
impl TranslatedDocument for About {
    const ENTITY: &'static str = "About";
    const TAG: &'static str = "about";
    const ROOT_TABLE: &'static str = "abouts";
    const TRANSLATION_TABLE: &'static str = "about_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.video_id, (SELECT f.url FROM files f WHERE f.id = r.video_id) AS video_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.description, t.mission, t.vision, t.statistics, t.created_at, t.updated_at";

    type Root = AboutRoot;
    type Translation = AboutTranslation;
    type Shared = AboutShared;
    type Content = AboutContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &AboutShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO abouts (document_id, image_id, video_id) VALUES ($1, $2, $3)")
            .bind(document_id)
            .bind(shared.image_id.flatten())
            .bind(shared.video_id.flatten())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &AboutShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE abouts SET
                image_id = CASE WHEN $4 THEN $2 ELSE image_id END,
                video_id = CASE WHEN $5 THEN $3 ELSE video_id END
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.image_id.flatten())
        .bind(shared.video_id.flatten())
        .bind(shared.image_id.is_some())
        .bind(shared.video_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &AboutContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO about_translations
                (document_id, locale, title, description, mission, vision, statistics)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                mission = EXCLUDED.mission,
                vision = EXCLUDED.vision,
                statistics = EXCLUDED.statistics,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(&content.description)
        .bind(&content.mission)
        .bind(&content.vision)
        .bind(Json(&content.statistics))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
