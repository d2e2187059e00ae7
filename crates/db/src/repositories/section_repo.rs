//! Section blocks keyed by page: `section_contents` and `section_ctas`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};
use vitrin_core::validation::{single_field_error, FieldErrors};

use crate::document::{Listed, PageKeyed, TranslatedDocument};
use crate::models::section::{
    SectionContent, SectionContentBody, SectionContentRoot, SectionContentShared,
    SectionContentTranslation, SectionCta, SectionCtaBody, SectionCtaRoot, SectionCtaShared,
    SectionCtaTranslation,
};

fn require_page_key(page_key: &Option<String>) -> FieldErrors {
    if page_key.is_none() {
        return single_field_error("page_key", "This field is required");
    }
    FieldErrors::new()
}

// ---------------------------------------------------------------------------
// Section content
// ---------------------------------------------------------------------------

#[async_trait]
impl TranslatedDocument for SectionContent {
    const ENTITY: &'static str = "SectionContent";
    const TAG: &'static str = "section-contents";
    const ROOT_TABLE: &'static str = "section_contents";
    const TRANSLATION_TABLE: &'static str = "section_content_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.page_key, r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.description, t.created_at, t.updated_at";

    type Root = SectionContentRoot;
    type Translation = SectionContentTranslation;
    type Shared = SectionContentShared;
    type Content = SectionContentBody;

    fn creation_errors(shared: &SectionContentShared) -> FieldErrors {
        require_page_key(&shared.page_key)
    }

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &SectionContentShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO section_contents (document_id, status, sort_order, page_key)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(&shared.page_key)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &SectionContentShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE section_contents SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                page_key = COALESCE($4, page_key)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(&shared.page_key)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &SectionContentBody,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO section_content_translations (document_id, locale, title, description)
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

impl Listed for SectionContent {
    const PAGE_KEY: &'static str = "section-contents";
}

impl PageKeyed for SectionContent {}

// ---------------------------------------------------------------------------
// Section call-to-action
// ---------------------------------------------------------------------------

#[async_trait]
impl TranslatedDocument for SectionCta {
    const ENTITY: &'static str = "SectionCta";
    const TAG: &'static str = "section-ctas";
    const ROOT_TABLE: &'static str = "section_ctas";
    const TRANSLATION_TABLE: &'static str = "section_cta_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.page_key, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.button_url, r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.description, t.button_text, t.created_at, t.updated_at";

    type Root = SectionCtaRoot;
    type Translation = SectionCtaTranslation;
    type Shared = SectionCtaShared;
    type Content = SectionCtaBody;

    fn creation_errors(shared: &SectionCtaShared) -> FieldErrors {
        require_page_key(&shared.page_key)
    }

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &SectionCtaShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO section_ctas
                (document_id, status, sort_order, page_key, image_id, button_url)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(&shared.page_key)
        .bind(shared.image_id.flatten())
        .bind(&shared.button_url)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &SectionCtaShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE section_ctas SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                page_key = COALESCE($4, page_key),
                image_id = CASE WHEN $7 THEN $5 ELSE image_id END,
                button_url = COALESCE($6, button_url)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(&shared.page_key)
        .bind(shared.image_id.flatten())
        .bind(&shared.button_url)
        .bind(shared.image_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &SectionCtaBody,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO section_cta_translations
                (document_id, locale, title, description, button_text)
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

impl Listed for SectionCta {
    const PAGE_KEY: &'static str = "section-ctas";
}

impl PageKeyed for SectionCta {}
