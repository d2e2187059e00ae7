//! Position collection: `positions` + `position_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, TranslatedDocument};
use crate::models::position::{
    Position, PositionContent, PositionRoot, PositionShared, PositionTranslation,
};

#[async_trait]
impl TranslatedDocument for Position {
    const ENTITY: &'static str = "Position";
    const TAG: &'static str = "positions";
    const ROOT_TABLE: &'static str = "positions";
    const TRANSLATION_TABLE: &'static str = "position_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str =
        "t.id, t.document_id, t.locale, t.name, t.created_at, t.updated_at";

    type Root = PositionRoot;
    type Translation = PositionTranslation;
    type Shared = PositionShared;
    type Content = PositionContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &PositionShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO positions (document_id, status, sort_order) VALUES ($1, $2, $3)")
            .bind(document_id)
            .bind(shared.status.unwrap_or_default().as_str())
            .bind(shared.sort_order.unwrap_or(0))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &PositionShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE positions SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &PositionContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO position_translations (document_id, locale, name)
             VALUES ($1, $2, $3)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                name = EXCLUDED.name,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.name.trim())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

impl Listed for Position {
    const PAGE_KEY: &'static str = "positions";
}
