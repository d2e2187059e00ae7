//! Contact singleton: `contacts` + `contact_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::TranslatedDocument;
use crate::models::contact::{
    Contact, ContactContent, ContactRoot, ContactShared, ContactTranslation,
};

#[async_trait]
impl TranslatedDocument for Contact {
    const ENTITY: &'static str = "Contact";
    const TAG: &'static str = "contact";
    const ROOT_TABLE: &'static str = "contacts";
    const TRANSLATION_TABLE: &'static str = "contact_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.phone, r.email, r.whatsapp, \
        r.map_url, r.facebook_url, r.instagram_url, r.linkedin_url, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.title, \
        t.address, t.working_hours, t.created_at, t.updated_at";

    type Root = ContactRoot;
    type Translation = ContactTranslation;
    type Shared = ContactShared;
    type Content = ContactContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &ContactShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO contacts (document_id, phone, email, whatsapp, map_url,
                                   facebook_url, instagram_url, linkedin_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(document_id)
        .bind(&shared.phone)
        .bind(&shared.email)
        .bind(&shared.whatsapp)
        .bind(&shared.map_url)
        .bind(&shared.facebook_url)
        .bind(&shared.instagram_url)
        .bind(&shared.linkedin_url)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &ContactShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE contacts SET
                phone = COALESCE($2, phone),
                email = COALESCE($3, email),
                whatsapp = COALESCE($4, whatsapp),
                map_url = COALESCE($5, map_url),
                facebook_url = COALESCE($6, facebook_url),
                instagram_url = COALESCE($7, instagram_url),
                linkedin_url = COALESCE($8, linkedin_url)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&shared.phone)
        .bind(&shared.email)
        .bind(&shared.whatsapp)
        .bind(&shared.map_url)
        .bind(&shared.facebook_url)
        .bind(&shared.instagram_url)
        .bind(&shared.linkedin_url)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &ContactContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO contact_translations (document_id, locale, title, address, working_hours)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                title = EXCLUDED.title,
                address = EXCLUDED.address,
                working_hours = EXCLUDED.working_hours,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.title.trim())
        .bind(&content.address)
        .bind(&content.working_hours)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
