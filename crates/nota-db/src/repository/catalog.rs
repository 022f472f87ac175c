//! # Catalog Repository
//!
//! Database operations for goods/service definitions.
//!
//! ## Key Rules
//! - `item_code` is unique across the catalog (UNIQUE index; a
//!   duplicate insert surfaces as [`DbError::UniqueViolation`])
//! - an item cannot be deleted while any line item references it
//!   (FK RESTRICT; surfaced as [`DbError::ForeignKeyViolation`])
//!
//! Line items snapshot the catalog fields they need at add time, so
//! updates here never rewrite transaction history.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use nota_core::CatalogItem;

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// let item = repo.get_by_code("ATK-001").await?;
/// let all = repo.list(100).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a catalog item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(CatalogItem))` - item found
    /// * `Ok(None)` - item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, item_code, item_name, description, unit_price_cents,
                   is_service, created_at, updated_at
            FROM catalog_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets a catalog item by its business code.
    pub async fn get_by_code(&self, item_code: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, item_code, item_name, description, unit_price_cents,
                   is_service, created_at, updated_at
            FROM catalog_items
            WHERE item_code = ?1
            "#,
        )
        .bind(item_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Searches the catalog by code or name substring.
    ///
    /// Case-insensitive; an empty query lists the catalog sorted by
    /// name.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<CatalogItem>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching catalog");

        if query.is_empty() {
            return self.list(limit).await;
        }

        let pattern = format!("%{}%", query);

        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, item_code, item_name, description, unit_price_cents,
                   is_service, created_at, updated_at
            FROM catalog_items
            WHERE item_code LIKE ?1 COLLATE NOCASE
               OR item_name LIKE ?1 COLLATE NOCASE
            ORDER BY item_name
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists catalog items sorted by name.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<CatalogItem>> {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, item_code, item_name, description, unit_price_cents,
                   is_service, created_at, updated_at
            FROM catalog_items
            ORDER BY item_name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new catalog item.
    ///
    /// ## Returns
    /// * `Ok(CatalogItem)` - inserted item
    /// * `Err(DbError::UniqueViolation)` - item_code already exists
    pub async fn insert(&self, item: &CatalogItem) -> DbResult<CatalogItem> {
        debug!(item_code = %item.item_code, "Inserting catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (
                id, item_code, item_name, description, unit_price_cents,
                is_service, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(item.unit_price_cents)
        .bind(item.is_service)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    /// Updates an existing catalog item.
    ///
    /// Does not touch existing line items: they carry their own frozen
    /// snapshot of code, name, and price.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - item doesn't exist
    pub async fn update(&self, item: &CatalogItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating catalog item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items SET
                item_code = ?2,
                item_name = ?3,
                description = ?4,
                unit_price_cents = ?5,
                is_service = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(item.unit_price_cents)
        .bind(item.is_service)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CatalogItem", &item.id));
        }

        Ok(())
    }

    /// Deletes a catalog item.
    ///
    /// ## Referential Integrity
    /// Deletion is blocked while any line item references the item.
    /// The explicit check gives a clear message; the FK RESTRICT rule
    /// backs it up at the database level.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - item still referenced
    /// * `Err(DbError::NotFound)` - item doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting catalog item");

        let references: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM line_items WHERE catalog_item_id = ?1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if references > 0 {
            return Err(DbError::referenced(format!(
                "catalog item {} is referenced by {} line item(s)",
                id, references
            )));
        }

        let result = sqlx::query("DELETE FROM catalog_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CatalogItem", id));
        }

        Ok(())
    }

    /// Counts catalog items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
