//! Branch collection: `branches` + `branch_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};
use vitrin_core::validation::{single_field_error, FieldErrors};

use crate::document::{Listed, TranslatedDocument};
use crate::models::branch::{Branch, BranchContent, BranchRoot, BranchShared, BranchTranslation};

#[async_trait]
impl TranslatedDocument for Branch {
    const ENTITY: &'static str = "Branch";
    const TAG: &'static str = "branches";
    const ROOT_TABLE: &'static str = "branches";
    const TRANSLATION_TABLE: &'static str = "branch_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.iso_code, r.phone, r.email, r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, \
        t.country_name, t.city, t.address, t.created_at, t.updated_at";

    type Root = BranchRoot;
    type Translation = BranchTranslation;
    type Shared = BranchShared;
    type Content = BranchContent;

    fn creation_errors(shared: &BranchShared) -> FieldErrors {
        if shared.iso_code.is_none() {
            return single_field_error("iso_code", "This field is required");
        }
        FieldErrors::new()
    }

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &BranchShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO branches (document_id, status, sort_order, iso_code, phone, email)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(&shared.iso_code)
        .bind(&shared.phone)
        .bind(&shared.email)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &BranchShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE branches SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                iso_code = COALESCE($4, iso_code),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email)
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(&shared.iso_code)
        .bind(&shared.phone)
        .bind(&shared.email)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &BranchContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO branch_translations (document_id, locale, country_name, city, address)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                country_name = EXCLUDED.country_name,
                city = EXCLUDED.city,
                address = EXCLUDED.address,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.country_name.trim())
        .bind(&content.city)
        .bind(&content.address)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

impl Listed for Branch {
    const PAGE_KEY: &'static str = "branches";
}
