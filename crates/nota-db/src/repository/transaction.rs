//! # Transaction Repository
//!
//! Database operations for transactions and their line items, including
//! the recalculation that keeps the derived totals group consistent.
//!
//! ## Recalculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Item Mutation (add / remove / settings)                │
//! │                                                                     │
//! │   BEGIN ──► mutate line_items ──► read flags + all line totals      │
//! │                                          │                          │
//! │                                          ▼                          │
//! │                              nota_core::tax::calculate              │
//! │                                          │                          │
//! │                                          ▼                          │
//! │             single UPDATE of the eight derived columns ──► COMMIT   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation's read-compute-write runs inside one database
//! transaction. SQLite's single-writer model serializes concurrent
//! mutations of the same row, so the stored totals always correspond to
//! a complete item set (last writer wins on the whole group).

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use nota_core::money::Money;
use nota_core::tax;
use nota_core::types::{LineItem, TaxFlags, TaxTotals, Transaction};
use nota_core::MAX_LINE_ITEMS;

// =============================================================================
// Filter
// =============================================================================

/// Filter criteria for listing transactions.
///
/// All criteria are optional and combine with AND. Dates are inclusive
/// on both ends.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring match on customer name.
    pub customer_name: Option<String>,

    /// Substring match on transaction number.
    pub number_contains: Option<String>,

    /// Earliest transaction date (inclusive), ISO 8601.
    pub start_date: Option<chrono::NaiveDate>,

    /// Latest transaction date (inclusive), ISO 8601.
    pub end_date: Option<chrono::NaiveDate>,

    /// Maximum rows to return. Default: 100.
    pub limit: u32,
}

impl TransactionFilter {
    /// Creates an empty filter with the default limit.
    pub fn new() -> Self {
        TransactionFilter {
            limit: 100,
            ..TransactionFilter::default()
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

const TRANSACTION_COLUMNS: &str = r#"
    id, transaction_number, transaction_date,
    customer_name, customer_address, treasurer_name, courier, notes,
    buyer_npwp, service_type, service_value_cents,
    vat_enabled, local_tax_enabled, pph22_enabled, pph23_enabled,
    subtotal_cents, vat_cents, local_tax_cents, pph22_cents, pph23_cents,
    stamp_duty_required, stamp_duty_cents, total_cents,
    created_at, updated_at
"#;

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Header Operations
    // =========================================================================

    /// Inserts a new transaction (no items yet, all totals zero).
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - transaction number taken
    pub async fn insert(&self, txn: &Transaction) -> DbResult<Transaction> {
        debug!(
            transaction_number = %txn.transaction_number,
            "Inserting transaction"
        );

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, transaction_number, transaction_date,
                customer_name, customer_address, treasurer_name, courier,
                notes, buyer_npwp, service_type, service_value_cents,
                vat_enabled, local_tax_enabled, pph22_enabled, pph23_enabled,
                subtotal_cents, vat_cents, local_tax_cents, pph22_cents,
                pph23_cents, stamp_duty_required, stamp_duty_cents,
                total_cents, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
                ?23, ?24, ?25
            )
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.transaction_number)
        .bind(txn.transaction_date)
        .bind(&txn.customer_name)
        .bind(&txn.customer_address)
        .bind(&txn.treasurer_name)
        .bind(&txn.courier)
        .bind(&txn.notes)
        .bind(&txn.buyer_npwp)
        .bind(&txn.service_type)
        .bind(txn.service_value_cents)
        .bind(txn.flags.vat_enabled)
        .bind(txn.flags.local_tax_enabled)
        .bind(txn.flags.pph22_enabled)
        .bind(txn.flags.pph23_enabled)
        .bind(txn.totals.subtotal_cents)
        .bind(txn.totals.vat_cents)
        .bind(txn.totals.local_tax_cents)
        .bind(txn.totals.pph22_cents)
        .bind(txn.totals.pph23_cents)
        .bind(txn.totals.stamp_duty_required)
        .bind(txn.totals.stamp_duty_cents)
        .bind(txn.totals.total_cents)
        .bind(txn.created_at)
        .bind(txn.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(txn.clone())
    }

    /// Gets a transaction by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE id = ?1",
            TRANSACTION_COLUMNS
        );

        let txn = sqlx::query_as::<_, Transaction>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(txn)
    }

    /// Gets a transaction by its business number.
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE transaction_number = ?1",
            TRANSACTION_COLUMNS
        );

        let txn = sqlx::query_as::<_, Transaction>(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(txn)
    }

    /// Lists transactions matching the filter, newest first.
    pub async fn list(&self, filter: &TransactionFilter) -> DbResult<Vec<Transaction>> {
        debug!(?filter, "Listing transactions");

        let customer_pattern = filter
            .customer_name
            .as_ref()
            .map(|name| format!("%{}%", name.trim()));
        let number_pattern = filter
            .number_contains
            .as_ref()
            .map(|num| format!("%{}%", num.trim()));
        let limit = if filter.limit == 0 { 100 } else { filter.limit };

        let sql = format!(
            r#"
            SELECT {} FROM transactions
            WHERE (?1 IS NULL OR customer_name LIKE ?1 COLLATE NOCASE)
              AND (?2 IS NULL OR transaction_number LIKE ?2)
              AND (?3 IS NULL OR transaction_date >= ?3)
              AND (?4 IS NULL OR transaction_date <= ?4)
            ORDER BY transaction_date DESC, created_at DESC
            LIMIT ?5
            "#,
            TRANSACTION_COLUMNS
        );

        let txns = sqlx::query_as::<_, Transaction>(&sql)
            .bind(customer_pattern)
            .bind(number_pattern)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(txns)
    }

    /// Updates a transaction's descriptive header fields.
    ///
    /// The transaction number is immutable and not touched here; the
    /// tax configuration has its own operation because changing it
    /// triggers recalculation.
    pub async fn update_header(&self, txn: &Transaction) -> DbResult<()> {
        debug!(id = %txn.id, "Updating transaction header");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                transaction_date = ?2,
                customer_name = ?3,
                customer_address = ?4,
                treasurer_name = ?5,
                courier = ?6,
                notes = ?7,
                buyer_npwp = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&txn.id)
        .bind(txn.transaction_date)
        .bind(&txn.customer_name)
        .bind(&txn.customer_address)
        .bind(&txn.treasurer_name)
        .bind(&txn.courier)
        .bind(&txn.notes)
        .bind(&txn.buyer_npwp)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", &txn.id));
        }

        Ok(())
    }

    /// Deletes a transaction and (by cascade) all of its line items.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting transaction");

        let result = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }

    /// Counts transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Line Items
    // =========================================================================

    /// Gets a transaction's line items in insertion order.
    pub async fn get_items(&self, transaction_id: &str) -> DbResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT id, transaction_id, catalog_item_id, item_code, item_name,
                   quantity_millis, unit_price_cents, discount_bps,
                   line_total_cents, created_at
            FROM line_items
            WHERE transaction_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a single line item by its ID.
    pub async fn get_item(&self, line_item_id: &str) -> DbResult<Option<LineItem>> {
        let item = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT id, transaction_id, catalog_item_id, item_code, item_name,
                   quantity_millis, unit_price_cents, discount_bps,
                   line_total_cents, created_at
            FROM line_items
            WHERE id = ?1
            "#,
        )
        .bind(line_item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Adds a line item and recalculates the transaction's totals, all
    /// inside one database transaction.
    ///
    /// The item's `line_total_cents` must already be derived from its
    /// quantity, unit price, and discount (the service layer computes
    /// it with the tax engine before calling this).
    ///
    /// ## Returns
    /// * `Ok(TaxTotals)` - the freshly recomputed totals group
    /// * `Err(DbError::NotFound)` - transaction doesn't exist
    pub async fn add_item(&self, item: &LineItem) -> DbResult<TaxTotals> {
        debug!(
            transaction_id = %item.transaction_id,
            item_code = %item.item_code,
            "Adding line item"
        );

        let mut db_tx = self.pool.begin().await?;

        // Existence + capacity check up front so the error is precise
        // and no item row is written on failure.
        let exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE id = ?1")
                .bind(&item.transaction_id)
                .fetch_one(&mut *db_tx)
                .await?;
        if exists == 0 {
            return Err(DbError::not_found("Transaction", &item.transaction_id));
        }

        let item_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM line_items WHERE transaction_id = ?1")
                .bind(&item.transaction_id)
                .fetch_one(&mut *db_tx)
                .await?;
        if item_count as usize >= MAX_LINE_ITEMS {
            return Err(DbError::Validation(
                nota_core::ValidationError::OutOfRange {
                    field: "line_items".to_string(),
                    min: 0,
                    max: MAX_LINE_ITEMS as i64,
                },
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO line_items (
                id, transaction_id, catalog_item_id, item_code, item_name,
                quantity_millis, unit_price_cents, discount_bps,
                line_total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.transaction_id)
        .bind(&item.catalog_item_id)
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(item.quantity_millis)
        .bind(item.unit_price_cents)
        .bind(item.discount_bps)
        .bind(item.line_total_cents)
        .bind(item.created_at)
        .execute(&mut *db_tx)
        .await?;

        let totals = recompute_totals(&mut db_tx, &item.transaction_id).await?;

        db_tx.commit().await?;

        Ok(totals)
    }

    /// Removes a line item and recalculates the transaction's totals,
    /// all inside one database transaction.
    ///
    /// Removing the last item leaves a valid empty transaction with
    /// every derived amount at zero.
    pub async fn remove_item(&self, line_item_id: &str) -> DbResult<TaxTotals> {
        debug!(line_item_id = %line_item_id, "Removing line item");

        let mut db_tx = self.pool.begin().await?;

        let transaction_id: Option<String> =
            sqlx::query_scalar("SELECT transaction_id FROM line_items WHERE id = ?1")
                .bind(line_item_id)
                .fetch_optional(&mut *db_tx)
                .await?;

        let transaction_id =
            transaction_id.ok_or_else(|| DbError::not_found("LineItem", line_item_id))?;

        sqlx::query("DELETE FROM line_items WHERE id = ?1")
            .bind(line_item_id)
            .execute(&mut *db_tx)
            .await?;

        let totals = recompute_totals(&mut db_tx, &transaction_id).await?;

        db_tx.commit().await?;

        Ok(totals)
    }

    // =========================================================================
    // Recalculation
    // =========================================================================

    /// Recalculates a transaction's totals from its current items.
    ///
    /// Idempotent: running it twice in a row yields identical stored
    /// values. Used directly for repair and after tax-setting changes;
    /// item mutations run the same logic inside their own transaction.
    pub async fn recalculate(&self, transaction_id: &str) -> DbResult<TaxTotals> {
        debug!(transaction_id = %transaction_id, "Recalculating totals");

        let mut db_tx = self.pool.begin().await?;
        let totals = recompute_totals(&mut db_tx, transaction_id).await?;
        db_tx.commit().await?;

        Ok(totals)
    }

    /// Updates a transaction's tax configuration and recalculates, all
    /// inside one database transaction.
    ///
    /// ## Arguments
    /// * `flags` - the new enabled-tax set
    /// * `service_type` / `service_value_cents` - the PPh23 base; with
    ///   PPh23 enabled but no value, PPh23 computes to zero
    pub async fn update_tax_settings(
        &self,
        transaction_id: &str,
        flags: TaxFlags,
        service_type: Option<String>,
        service_value_cents: Option<i64>,
    ) -> DbResult<TaxTotals> {
        debug!(
            transaction_id = %transaction_id,
            ?flags,
            "Updating tax settings"
        );

        let mut db_tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                vat_enabled = ?2,
                local_tax_enabled = ?3,
                pph22_enabled = ?4,
                pph23_enabled = ?5,
                service_type = ?6,
                service_value_cents = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(transaction_id)
        .bind(flags.vat_enabled)
        .bind(flags.local_tax_enabled)
        .bind(flags.pph22_enabled)
        .bind(flags.pph23_enabled)
        .bind(&service_type)
        .bind(service_value_cents)
        .bind(Utc::now())
        .execute(&mut *db_tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", transaction_id));
        }

        let totals = recompute_totals(&mut db_tx, transaction_id).await?;

        db_tx.commit().await?;

        Ok(totals)
    }
}

// =============================================================================
// Recalculation Core
// =============================================================================

/// Recomputes and writes back the derived totals group for one
/// transaction, on the caller's open database transaction.
///
/// Reads the tax flags and service value, sums the complete current
/// line-item set, runs the tax engine, and writes all eight derived
/// columns in a single UPDATE.
async fn recompute_totals(
    conn: &mut SqliteConnection,
    transaction_id: &str,
) -> DbResult<TaxTotals> {
    let row: Option<(bool, bool, bool, bool, Option<i64>)> = sqlx::query_as(
        r#"
        SELECT vat_enabled, local_tax_enabled, pph22_enabled, pph23_enabled,
               service_value_cents
        FROM transactions
        WHERE id = ?1
        "#,
    )
    .bind(transaction_id)
    .fetch_optional(&mut *conn)
    .await?;

    let (vat, local, pph22, pph23, service_value_cents) =
        row.ok_or_else(|| DbError::not_found("Transaction", transaction_id))?;

    let flags = TaxFlags {
        vat_enabled: vat,
        local_tax_enabled: local,
        pph22_enabled: pph22,
        pph23_enabled: pph23,
    };

    let line_totals: Vec<i64> =
        sqlx::query_scalar("SELECT line_total_cents FROM line_items WHERE transaction_id = ?1")
            .bind(transaction_id)
            .fetch_all(&mut *conn)
            .await?;

    let subtotal = tax::sum_line_totals(line_totals.into_iter().map(Money::from_cents));
    let totals = tax::calculate(subtotal, service_value_cents.map(Money::from_cents), flags);

    let result = sqlx::query(
        r#"
        UPDATE transactions SET
            subtotal_cents = ?2,
            vat_cents = ?3,
            local_tax_cents = ?4,
            pph22_cents = ?5,
            pph23_cents = ?6,
            stamp_duty_required = ?7,
            stamp_duty_cents = ?8,
            total_cents = ?9,
            updated_at = ?10
        WHERE id = ?1
        "#,
    )
    .bind(transaction_id)
    .bind(totals.subtotal_cents)
    .bind(totals.vat_cents)
    .bind(totals.local_tax_cents)
    .bind(totals.pph22_cents)
    .bind(totals.pph23_cents)
    .bind(totals.stamp_duty_required)
    .bind(totals.stamp_duty_cents)
    .bind(totals.total_cents)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Transaction", transaction_id));
    }

    Ok(totals)
}
