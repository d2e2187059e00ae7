//! Service collection: `services` + `service_translations`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, Sluggable, TranslatedDocument};
use crate::models::service::{
    Service, ServiceContent, ServiceRoot, ServiceShared, ServiceTranslation,
};

#[async_trait]
impl TranslatedDocument for Service {
    const ENTITY: &'static str = "Service";
    const TAG: &'static str = "services";
    const ROOT_TABLE: &'static str = "services";
    const TRANSLATION_TABLE: &'static str = "service_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.icon_id, (SELECT f.url FROM files f WHERE f.id = r.icon_id) AS icon_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.slug, t.description, t.content, t.advantages, t.created_at, t.updated_at";

    type Root = ServiceRoot;
    type Translation = ServiceTranslation;
    type Shared = ServiceShared;
    type Content = ServiceContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &ServiceShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO services (document_id, status, sort_order, image_id, icon_id)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(shared.image_id.flatten())
        .bind(shared.icon_id.flatten())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &ServiceShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE services SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                image_id = CASE WHEN $6 THEN $4 ELSE image_id END,
                icon_id = CASE WHEN $7 THEN $5 ELSE icon_id END
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(shared.image_id.flatten())
        .bind(shared.icon_id.flatten())
        .bind(shared.image_id.is_some())
        .bind(shared.icon_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &ServiceContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO service_translations
                (document_id, locale, title, slug, description, content, advantages)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                slug = EXCLUDED.slug,
                description = EXCLUDED.description,
                content = EXCLUDED.content,
                advantages = EXCLUDED.advantages,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(content.resolved_slug())
        .bind(&content.description)
        .bind(&content.content)
        .bind(Json(&content.advantages))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

impl Listed for Service {
    const PAGE_KEY: &'static str = "services";
}

impl Sluggable for Service {}
