//! Employee collection: `employees` + `employee_translations`.

use async_trait::async_trait;
use sqlx::PgConnection;
use vitrin_core::locale::Locale;
use vitrin_core::types::{DbId, DocumentId};

use crate::document::{Listed, TranslatedDocument};
use crate::models::employee::{
    Employee, EmployeeContent, EmployeeRoot, EmployeeShared, EmployeeTranslation,
};

#[async_trait]
impl TranslatedDocument for Employee {
    const ENTITY: &'static str = "Employee";
    const TAG: &'static str = "employees";
    const RELATED_TAGS: &'static [&'static str] = &["positions"];
    const ROOT_TABLE: &'static str = "employees";
    const TRANSLATION_TABLE: &'static str = "employee_translations";
    const ROOT_COLUMNS: &'static str = "r.id, r.document_id, r.status, r.sort_order, \
        r.image_id, (SELECT f.url FROM files f WHERE f.id = r.image_id) AS image_url, \
        r.position_id, ( \
            SELECT jsonb_object_agg(pt.locale, pt.name) \
            FROM positions p \
            JOIN position_translations pt \
              ON pt.document_id = p.document_id AND pt.is_deleted = FALSE \
            WHERE p.id = r.position_id AND p.is_deleted = FALSE) AS position_names, \
        r.is_deleted, r.created_at, r.updated_at";
    const TRANSLATION_COLUMNS: &'static str = "t.id, t.document_id, t.locale, t.full_name, \
        t.bio, t.created_at, t.updated_at";

    type Root = EmployeeRoot;
    type Translation = EmployeeTranslation;
    type Shared = EmployeeShared;
    type Content = EmployeeContent;

    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &EmployeeShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO employees (document_id, status, sort_order, image_id, position_id)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(document_id)
        .bind(shared.status.unwrap_or_default().as_str())
        .bind(shared.sort_order.unwrap_or(0))
        .bind(shared.image_id.flatten())
        .bind(shared.position_id.flatten())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &EmployeeShared,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE employees SET
                status = COALESCE($2, status),
                sort_order = COALESCE($3, sort_order),
                image_id = CASE WHEN $6 THEN $4 ELSE image_id END,
                position_id = CASE WHEN $7 THEN $5 ELSE position_id END
             WHERE id = $1",
        )
        .bind(id)
        .bind(shared.status.map(|s| s.as_str()))
        .bind(shared.sort_order)
        .bind(shared.image_id.flatten())
        .bind(shared.position_id.flatten())
        .bind(shared.image_id.is_some())
        .bind(shared.position_id.is_some())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &EmployeeContent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO employee_translations (document_id, locale, full_name, bio)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (document_id, locale) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                bio = EXCLUDED.bio,
                is_deleted = FALSE",
        )
        .bind(document_id)
        .bind(locale.as_str())
        .bind(content.full_name.trim())
        .bind(&content.bio)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

impl Listed for Employee {
    const PAGE_KEY: &'static str = "employees";
}
