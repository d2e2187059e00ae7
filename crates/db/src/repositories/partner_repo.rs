//! Partner collection: `partners` + `partner_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, TranslatedDocument};
use crate::models::partner::{
    Partner, PartnerContent, PartnerRoot, PartnerShared, PartnerTranslation,
};

#[async_trait]
impl TranslatedDocument for Partner {
    const ENTITY: &'static str = "Partner";
    const TAG: &'static str = "partners";
    const ROOT_TABLE: &'static str = "partners";
    const TRANSLATION_TABLE: &'static str = "partner_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.website_url, r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str =
        "t.id, t.document_id, t.locale, t.name, t.created_at, t.updated_at";

    type Root = PartnerRoot;
    type Translation = PartnerTranslation;
    type Shared = PartnerShared;
    type Content = PartnerContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &PartnerShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO partners (document_id, status, sort_order, image_id, website_url)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(shared.image_id.flatten())
        .bind(&shared.website_url)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &PartnerShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE partners SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                image_id = CASE WHEN $6 THEN $4 ELSE image_id END,
                website_url = COALESCE($5, website_url)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(shared.image_id.flatten())
        .bind(&shared.website_url)
        .bind(shared.image_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &PartnerContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO partner_translations (document_id, locale, name)
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

impl Listed for Partner {
    const PAGE_KEY: &'static str = "partners";
}
