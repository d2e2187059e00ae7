//! Blog collection: `blogs` + `blog_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, Sluggable, TranslatedDocument};
use crate::models::blog::{Blog, BlogContent, BlogRoot, BlogShared, BlogTranslation};

#[async_trait]
impl TranslatedDocument for Blog {
    const ENTITY: &'static str = "Blog";
    const TAG: &'static str = "blogs";
    const ROOT_TABLE: &'static str = "blogs";
    const TRANSLATION_TABLE: &'static str = "blog_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.published_at, r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.slug, t.description, t.content, t.created_at, t.updated_at";

    type Root = BlogRoot;
    type Translation = BlogTranslation;
    type Shared = BlogShared;
    type Content = BlogContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &BlogShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO blogs (document_id, status, sort_order, image_id, published_at)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(shared.image_id.flatten())
        .bind(shared.published_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &BlogShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE blogs SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                image_id = CASE WHEN $6 THEN $4 ELSE image_id END,
                published_at = COALESCE($5, published_at)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(shared.image_id.flatten())
        .bind(shared.published_at)
        .bind(shared.image_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &BlogContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO blog_translations (document_id, locale, title, slug, description, content)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                slug = EXCLUDED.slug,
                description = EXCLUDED.description,
                content = EXCLUDED.content,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(content.resolved_slug())
        .bind(&content.description)
        .bind(&content.content)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

impl Listed for Blog {
    const PAGE_KEY: &'static str = "blog";
}

impl Sluggable for Blog {}
