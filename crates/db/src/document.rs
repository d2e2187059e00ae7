//! The translated-document convention shared by every content type.
//!
//! A content type is a *root* table holding locale-independent fields plus a
//! stable `document_id`, and a *translation* table holding one row per
//! `(document_id, locale)`. Each content type is a zero-sized marker
//! implementing [`TranslatedDocument`]; it supplies its table names, column
//! lists and the three column-specific writes. Everything else (singleton
//! upsert, collection CRUD, soft delete, public listing) is implemented once
//! in [`DocumentRepo`].

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::{FromRow, PgConnection, PgPool};
use validator::Validate;
use vitrin_core::locale::Locale;
use vitrin_core::pagination::{PageRequest, SortOrder};
use vitrin_core::types::{new_document_id, DbId, DocumentId};
use vitrin_core::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Accessors every root row exposes to the generic repository.
pub trait RootRecord {
    fn id(&self) -> DbId;
    fn document_id(&self) -> DocumentId;
}

/// Accessors every translation row exposes to the generic repository.
pub trait TranslationRecord {
    fn document_id(&self) -> DocumentId;
}

/// Implement [`RootRecord`] and [`TranslationRecord`] for a row pair whose
/// structs expose `id` and `document_id` fields.
#[macro_export]
macro_rules! document_records {
    ($root:ty, $translation:ty) => {
        impl $crate::document::RootRecord for $root {
            fn id(&self) -> vitrin_core::types::DbId {
                self.id
            }
            fn document_id(&self) -> vitrin_core::types::DocumentId {
                self.document_id
            }
        }

        impl $crate::document::TranslationRecord for $translation {
            fn document_id(&self) -> vitrin_core::types::DocumentId {
                self.document_id
            }
        }
    };
}

/// A root table + translation table pair.
///
/// `ROOT_COLUMNS` must be written against the alias `r` and
/// `TRANSLATION_COLUMNS` against the alias `t`.
#[async_trait]
pub trait TranslatedDocument: Send + Sync + 'static {
    /// Entity name used in error messages and logs.
    const ENTITY: &'static str;
    /// Cache tag and route segment (`blogs`, `hero`).
    const TAG: &'static str;
    /// Tags of other content types whose rows are read into this type's root
    /// columns. Cached reads of this type are invalidated by them too.
    const RELATED_TAGS: &'static [&'static str] = &[];
    const ROOT_TABLE: &'static str;
    const TRANSLATION_TABLE: &'static str;
    const ROOT_COLUMNS: &'static str;
    const TRANSLATION_COLUMNS: &'static str;

    type Root: RootRecord
        + std::fmt::Debug
        + for<'r> FromRow<'r, PgRow>
        + Serialize
        + Clone
        + Send
        + Sync
        + Unpin
        + 'static;
    type Translation: TranslationRecord
        + std::fmt::Debug
        + for<'r> FromRow<'r, PgRow>
        + Serialize
        + Clone
        + Send
        + Sync
        + Unpin
        + 'static;
    /// Locale-independent fields. `None` leaves the stored value unchanged.
    type Shared: DeserializeOwned + Validate + Send + Sync + 'static;
    /// Localized fields for one translation row.
    type Content: DeserializeOwned + Validate + Send + Sync + 'static;

    /// Shared-field checks that apply only when a collection root is created
    /// through [`DocumentRepo::create`], such as columns that are required on
    /// insert but optional on update. Singletons do not use them.
    fn creation_errors(_shared: &Self::Shared) -> FieldErrors {
        FieldErrors::new()
    }

    /// Insert a root row with the given document id.
    async fn insert_root(
        conn: &mut PgConnection,
        document_id: DocumentId,
        shared: &Self::Shared,
    ) -> Result<(), sqlx::Error>;

    /// Apply the provided shared fields to an existing root row.
    async fn update_root(
        conn: &mut PgConnection,
        id: DbId,
        shared: &Self::Shared,
    ) -> Result<(), sqlx::Error>;

    /// Insert or update the translation keyed by `(document_id, locale)`.
    /// A previously soft-deleted translation is revived.
    async fn upsert_translation(
        conn: &mut PgConnection,
        document_id: DocumentId,
        locale: Locale,
        content: &Self::Content,
    ) -> Result<(), sqlx::Error>;
}

/// Collection content types. The root table carries `status` and
/// `sort_order` columns.
pub trait Listed: TranslatedDocument {
    /// Page key whose section blocks accompany the public listing.
    const PAGE_KEY: &'static str;
}

/// Collections whose translation table has a `slug` column unique per locale.
pub trait Sluggable: Listed {}

/// Collections whose root table has a `page_key` column.
pub trait PageKeyed: Listed {}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A root row with all of its live translations (admin detail view).
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct DocumentView<D: TranslatedDocument> {
    #[serde(flatten)]
    pub root: D::Root,
    pub translations: Vec<D::Translation>,
}

/// A root row with the translation for one locale, if any.
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct LocalizedDocument<D: TranslatedDocument> {
    #[serde(flatten)]
    pub root: D::Root,
    pub translation: Option<D::Translation>,
}

impl<D: TranslatedDocument> std::fmt::Debug for DocumentView<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentView")
            .field("root", &self.root)
            .field("translations", &self.translations)
            .finish()
    }
}

impl<D: TranslatedDocument> std::fmt::Debug for LocalizedDocument<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizedDocument")
            .field("root", &self.root)
            .field("translation", &self.translation)
            .finish()
    }
}

/// SQL condition selecting roots visible on the public site for locale `$1`.
fn public_filter<D: TranslatedDocument>() -> String {
    format!(
        "r.is_deleted = FALSE AND r.status = 'ACTIVE' AND EXISTS ( \
             SELECT 1 FROM {tr} t \
             WHERE t.document_id = r.document_id AND t.locale = $1 AND t.is_deleted = FALSE)",
        tr = D::TRANSLATION_TABLE
    )
}

// ---------------------------------------------------------------------------
// Generic repository
// ---------------------------------------------------------------------------

/// Data access for any [`TranslatedDocument`]. Call as
/// `DocumentRepo::<Blog>::create(...)`.
pub struct DocumentRepo<D>(PhantomData<D>);

impl<D: TranslatedDocument> DocumentRepo<D> {
    // -----------------------------------------------------------------------
    // Row lookups
    // -----------------------------------------------------------------------

    /// Find a live root row by primary key.
    pub async fn find_root<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<D::Root>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} r WHERE r.id = $1 AND r.is_deleted = FALSE",
            D::ROOT_COLUMNS,
            D::ROOT_TABLE
        );
        sqlx::query_as::<_, D::Root>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a live root row by its document id.
    pub async fn find_root_by_document<'e>(
        executor: impl PgExecutor<'e>,
        document_id: DocumentId,
    ) -> Result<Option<D::Root>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} r WHERE r.document_id = $1 AND r.is_deleted = FALSE",
            D::ROOT_COLUMNS,
            D::ROOT_TABLE
        );
        sqlx::query_as::<_, D::Root>(&query)
            .bind(document_id)
            .fetch_optional(executor)
            .await
    }

    /// The first live root row, which for singleton types is the only one.
    pub async fn find_singleton_root<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<D::Root>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} r WHERE r.is_deleted = FALSE ORDER BY r.id ASC LIMIT 1",
            D::ROOT_COLUMNS,
            D::ROOT_TABLE
        );
        sqlx::query_as::<_, D::Root>(&query)
            .fetch_optional(executor)
            .await
    }

    /// All live translations of a document, ordered by locale.
    pub async fn list_translations<'e>(
        executor: impl PgExecutor<'e>,
        document_id: DocumentId,
    ) -> Result<Vec<D::Translation>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} t \
             WHERE t.document_id = $1 AND t.is_deleted = FALSE \
             ORDER BY t.locale",
            D::TRANSLATION_COLUMNS,
            D::TRANSLATION_TABLE
        );
        sqlx::query_as::<_, D::Translation>(&query)
            .bind(document_id)
            .fetch_all(executor)
            .await
    }

    /// The live translation of a document for one locale.
    pub async fn find_translation<'e>(
        executor: impl PgExecutor<'e>,
        document_id: DocumentId,
        locale: Locale,
    ) -> Result<Option<D::Translation>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} t \
             WHERE t.document_id = $1 AND t.locale = $2 AND t.is_deleted = FALSE",
            D::TRANSLATION_COLUMNS,
            D::TRANSLATION_TABLE
        );
        sqlx::query_as::<_, D::Translation>(&query)
            .bind(document_id)
            .bind(locale.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Live translations for a batch of documents in one locale.
    async fn translations_for<'e>(
        executor: impl PgExecutor<'e>,
        document_ids: &[DocumentId],
        locale: Locale,
    ) -> Result<Vec<D::Translation>, sqlx::Error> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM {} t \
             WHERE t.document_id = ANY($1) AND t.locale = $2 AND t.is_deleted = FALSE",
            D::TRANSLATION_COLUMNS,
            D::TRANSLATION_TABLE
        );
        sqlx::query_as::<_, D::Translation>(&query)
            .bind(document_ids)
            .bind(locale.as_str())
            .fetch_all(executor)
            .await
    }

    async fn view_of(
        conn: &mut PgConnection,
        root: D::Root,
    ) -> Result<DocumentView<D>, sqlx::Error> {
        let translations = Self::list_translations(&mut *conn, root.document_id()).await?;
        Ok(DocumentView { root, translations })
    }

    /// Pair each root with its translation, preserving root order.
    async fn localize<'e>(
        executor: impl PgExecutor<'e>,
        roots: Vec<D::Root>,
        locale: Locale,
    ) -> Result<Vec<LocalizedDocument<D>>, sqlx::Error> {
        let ids: Vec<DocumentId> = roots.iter().map(|r| r.document_id()).collect();
        let mut by_document: HashMap<DocumentId, D::Translation> =
            Self::translations_for(executor, &ids, locale)
                .await?
                .into_iter()
                .map(|t| (t.document_id(), t))
                .collect();

        Ok(roots
            .into_iter()
            .map(|root| {
                let translation = by_document.remove(&root.document_id());
                LocalizedDocument { root, translation }
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Detail reads
    // -----------------------------------------------------------------------

    /// A live root with all of its translations.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<DocumentView<D>>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        match Self::find_root(&mut *conn, id).await? {
            Some(root) => Ok(Some(Self::view_of(&mut conn, root).await?)),
            None => Ok(None),
        }
    }

    /// The singleton root with all of its translations.
    pub async fn get_singleton(pool: &PgPool) -> Result<Option<DocumentView<D>>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        match Self::find_singleton_root(&mut *conn).await? {
            Some(root) => Ok(Some(Self::view_of(&mut conn, root).await?)),
            None => Ok(None),
        }
    }

    /// The singleton root and its translation for `locale`.
    ///
    /// Returns `None` when either is missing: a public page has nothing to
    /// show without localized text.
    pub async fn find_localized_singleton(
        pool: &PgPool,
        locale: Locale,
    ) -> Result<Option<LocalizedDocument<D>>, sqlx::Error> {
        let Some(root) = Self::find_singleton_root(pool).await? else {
            return Ok(None);
        };
        let translation = Self::find_translation(pool, root.document_id(), locale).await?;
        Ok(translation.map(|t| LocalizedDocument {
            root,
            translation: Some(t),
        }))
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Ensure exactly one live root exists and upsert its `locale` translation.
    ///
    /// Runs in one transaction. A transaction-scoped advisory lock keyed by
    /// the root table serializes concurrent first saves so they cannot both
    /// create a root.
    pub async fn upsert_singleton(
        pool: &PgPool,
        locale: Locale,
        shared: &D::Shared,
        content: &D::Content,
    ) -> Result<DocumentView<D>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(D::ROOT_TABLE)
            .execute(&mut *tx)
            .await?;

        let document_id = match Self::find_singleton_root(&mut *tx).await? {
            Some(root) => {
                D::update_root(&mut tx, root.id(), shared).await?;
                root.document_id()
            }
            None => {
                let document_id = new_document_id();
                D::insert_root(&mut tx, document_id, shared).await?;
                document_id
            }
        };

        D::upsert_translation(&mut tx, document_id, locale, content).await?;

        let root = Self::find_root_by_document(&mut *tx, document_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let view = Self::view_of(&mut tx, root).await?;

        tx.commit().await?;
        Ok(view)
    }

    /// Create a new root with a fresh document id and its first translation.
    pub async fn create(
        pool: &PgPool,
        locale: Locale,
        shared: &D::Shared,
        content: &D::Content,
    ) -> Result<DocumentView<D>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let document_id = new_document_id();
        D::insert_root(&mut tx, document_id, shared).await?;
        D::upsert_translation(&mut tx, document_id, locale, content).await?;

        let root = Self::find_root_by_document(&mut *tx, document_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let view = Self::view_of(&mut tx, root).await?;

        tx.commit().await?;
        Ok(view)
    }

    /// Lock a live root row for the rest of the transaction.
    async fn lock_root(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<DocumentId>, sqlx::Error> {
        let query = format!(
            "SELECT document_id FROM {} WHERE id = $1 AND is_deleted = FALSE FOR UPDATE",
            D::ROOT_TABLE
        );
        sqlx::query_scalar::<_, DocumentId>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Update the shared fields of a live root.
    ///
    /// Returns `None` if no live root with the given `id` exists.
    pub async fn update_shared(
        pool: &PgPool,
        id: DbId,
        shared: &D::Shared,
    ) -> Result<Option<DocumentView<D>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if Self::lock_root(&mut tx, id).await?.is_none() {
            return Ok(None);
        }
        D::update_root(&mut tx, id, shared).await?;

        let root = Self::find_root(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let view = Self::view_of(&mut tx, root).await?;

        tx.commit().await?;
        Ok(Some(view))
    }

    /// Upsert the `locale` translation of a live root.
    ///
    /// Returns `None` if no live root with the given `id` exists.
    pub async fn upsert_content(
        pool: &PgPool,
        id: DbId,
        locale: Locale,
        content: &D::Content,
    ) -> Result<Option<DocumentView<D>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(document_id) = Self::lock_root(&mut tx, id).await? else {
            return Ok(None);
        };
        D::upsert_translation(&mut tx, document_id, locale, content).await?;

        let root = Self::find_root(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let view = Self::view_of(&mut tx, root).await?;

        tx.commit().await?;
        Ok(Some(view))
    }

    async fn soft_delete_document(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE \
             RETURNING document_id",
            D::ROOT_TABLE
        );
        let document_id = sqlx::query_scalar::<_, DocumentId>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        let Some(document_id) = document_id else {
            return Ok(false);
        };

        let query = format!(
            "UPDATE {} SET is_deleted = TRUE WHERE document_id = $1 AND is_deleted = FALSE",
            D::TRANSLATION_TABLE
        );
        sqlx::query(&query)
            .bind(document_id)
            .execute(&mut *conn)
            .await?;
        Ok(true)
    }

    /// Soft-delete a root and all of its translations.
    ///
    /// Returns `true` if a live root was flagged.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = Self::soft_delete_document(&mut tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    /// Soft-delete the live singleton root and its translations.
    pub async fn soft_delete_singleton(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = match Self::find_singleton_root(&mut *tx).await? {
            Some(root) => Self::soft_delete_document(&mut tx, root.id()).await?,
            None => false,
        };
        tx.commit().await?;
        Ok(deleted)
    }
}

impl<D: Listed> DocumentRepo<D> {
    /// Admin listing: live roots with their `locale` translation, if any.
    pub async fn list_admin(
        pool: &PgPool,
        locale: Locale,
        page: PageRequest,
        include_inactive: bool,
    ) -> Result<Vec<LocalizedDocument<D>>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {root} r \
             WHERE r.is_deleted = FALSE AND ($1 OR r.status = 'ACTIVE') \
             ORDER BY r.sort_order ASC, r.created_at DESC, r.id DESC \
             LIMIT $2 OFFSET $3",
            cols = D::ROOT_COLUMNS,
            root = D::ROOT_TABLE
        );
        let roots = sqlx::query_as::<_, D::Root>(&query)
            .bind(include_inactive)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Self::localize(pool, roots, locale).await
    }

    /// Count of rows matched by [`Self::list_admin`].
    pub async fn count_admin(pool: &PgPool, include_inactive: bool) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM {} r \
             WHERE r.is_deleted = FALSE AND ($1 OR r.status = 'ACTIVE')",
            D::ROOT_TABLE
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(include_inactive)
            .fetch_one(pool)
            .await
    }

    /// One page of publicly visible documents in `locale`.
    pub async fn list_public(
        pool: &PgPool,
        locale: Locale,
        page: PageRequest,
        sort: SortOrder,
    ) -> Result<Vec<LocalizedDocument<D>>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {root} r WHERE {filter} \
             ORDER BY r.sort_order ASC, r.created_at {dir}, r.id {dir} \
             LIMIT $2 OFFSET $3",
            cols = D::ROOT_COLUMNS,
            root = D::ROOT_TABLE,
            filter = public_filter::<D>(),
            dir = sort.as_sql()
        );
        let roots = sqlx::query_as::<_, D::Root>(&query)
            .bind(locale.as_str())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Self::localize(pool, roots, locale).await
    }

    /// Count of documents visible on the public site in `locale`.
    pub async fn count_public(pool: &PgPool, locale: Locale) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM {} r WHERE {}",
            D::ROOT_TABLE,
            public_filter::<D>()
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(locale.as_str())
            .fetch_one(pool)
            .await
    }
}

impl<D: Sluggable> DocumentRepo<D> {
    /// Publicly visible document whose `locale` translation has `slug`.
    pub async fn find_public_by_slug(
        pool: &PgPool,
        locale: Locale,
        slug: &str,
    ) -> Result<Option<LocalizedDocument<D>>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {tr} t \
             JOIN {root} r ON r.document_id = t.document_id \
             WHERE t.locale = $1 AND t.slug = $2 AND t.is_deleted = FALSE \
               AND r.is_deleted = FALSE AND r.status = 'ACTIVE'",
            cols = D::TRANSLATION_COLUMNS,
            tr = D::TRANSLATION_TABLE,
            root = D::ROOT_TABLE
        );
        let Some(translation) = sqlx::query_as::<_, D::Translation>(&query)
            .bind(locale.as_str())
            .bind(slug)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let root = Self::find_root_by_document(pool, translation.document_id()).await?;
        Ok(root.map(|root| LocalizedDocument {
            root,
            translation: Some(translation),
        }))
    }
}

impl<D: PageKeyed> DocumentRepo<D> {
    /// The first publicly visible block for `page_key` in `locale`.
    pub async fn find_public_by_page_key(
        pool: &PgPool,
        locale: Locale,
        page_key: &str,
    ) -> Result<Option<LocalizedDocument<D>>, sqlx::Error> {
        let query = format!(
            "SELECT {cols} FROM {root} r WHERE r.page_key = $2 AND {filter} \
             ORDER BY r.sort_order ASC, r.created_at DESC LIMIT 1",
            cols = D::ROOT_COLUMNS,
            root = D::ROOT_TABLE,
            filter = public_filter::<D>()
        );
        let Some(root) = sqlx::query_as::<_, D::Root>(&query)
            .bind(locale.as_str())
            .bind(page_key)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let translation = Self::find_translation(pool, root.document_id(), locale).await?;
        Ok(Some(LocalizedDocument { root, translation }))
    }
}
