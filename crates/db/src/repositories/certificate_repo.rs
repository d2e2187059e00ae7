//! Certificate collection: `certificates` + `certificate_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, TranslatedDocument};
use crate::models::certificate::{
    Certificate, CertificateContent, CertificateRoot, CertificateShared, CertificateTranslation,
};

#[async_trait]
impl TranslatedDocument for Certificate {
    const ENTITY: &'static str = "Certificate";
    const TAG: &'static str = "certificates";
    const ROOT_TABLE: &'static str = "certificates";
    const TRANSLATION_TABLE: &'static str = "certificate_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.description, t.created_at, t.updated_at";

    type Root = CertificateRoot;
    type Translation = CertificateTranslation;
    type Shared = CertificateShared;
    type Content = CertificateContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &CertificateShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO certificates (document_id, status, sort_order, image_id)
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
        shared: &CertificateShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE certificates SET
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
        content: &CertificateContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO certificate_translations (document_id, locale, title, description)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(&content.description)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

impl Listed for Certificate {
    const PAGE_KEY: &'static str = "certificates";
}
