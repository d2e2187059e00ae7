//! Features singleton: `features` + `feature_translations`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::TranslatedDocument;
use crate::models::features::{
    Features, FeaturesContent, FeaturesRoot, FeaturesShared, FeaturesTranslation,
};

#[async_trait]
impl TranslatedDocument for Features {
    const ENTITY: &'static str = "Features";
    const TAG: &'static str = "features";
    const ROOT_TABLE: &'static str = "features";
    const TRANSLATION_TABLE: &'static str = "feature_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.description, t.items, t.created_at, t.updated_at";

    type Root = FeaturesRoot;
    type Translation = FeaturesTranslation;
    type Shared = FeaturesShared;
    type Content = FeaturesContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &FeaturesShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO features (document_id, image_id) VALUES ($1, $2)")
            .bind(document_id)
            .bind(shared.image_id.flatten())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &FeaturesShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE features SET image_id = CASE WHEN $3 THEN $2 ELSE image_id END
             WHERE id = $1",
        )
            .bind(id)
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
        content: &FeaturesContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO feature_translations (document_id, locale, title, description, items)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                items = EXCLUDED.items,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(&content.description)
        .bind(Json(&content.items))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
