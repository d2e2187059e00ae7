//! Hero singleton: `heroes` + `hero_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::TranslatedDocument;
use crate::models::hero::{Hero, HeroContent, HeroRoot, HeroShared, HeroTranslation};

#[async_trait]
impl TranslatedDocument for Hero {
    const ENTITY: &'static str = "Hero";
    const TAG: &'static str = "hero";
    const ROOT_TABLE: &'static str = "heroes";
    const TRANSLATION_TABLE: &'static str = "hero_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.video_id, (SELECT f.url FROM files f WHERE f.id = r.video_id) AS video_url, \
        r.button_url, r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.description, t.button_text, t.created_at, t.updated_at";

    type Root = HeroRoot;
    type Translation = HeroTranslation;
    type Shared = HeroShared;
    type Content = HeroContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &HeroShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO heroes (document_id, image_id, video_id, button_url)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(document_id)
        .bind(shared.image_id.flatten())
        .bind(shared.video_id.flatten())
        .bind(&shared.button_url)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &HeroShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE heroes SET
                image_id = CASE WHEN $5 THEN $2 ELSE image_id END,
                video_id = CASE WHEN $6 THEN $3 ELSE video_id END,
                button_url = COALESCE($4, button_url)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.image_id.flatten())
        .bind(shared.video_id.flatten())
        .bind(&shared.button_url)
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
        content: &HeroContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO hero_translations (document_id, locale, title, description, button_text)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                button_text = EXCLUDED.button_text,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(&content.description)
        .bind(&content.button_text)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
