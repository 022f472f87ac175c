//! # Transaction Service
//!
//! The orchestration layer over the repositories: validates input,
//! snapshots catalog data into line items, and drives recalculation.
//!
//! ## Operation Flow (add item)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  add_item(transaction, catalog_item, qty, price?, discount)         │
//! │                                                                     │
//! │  1. validate qty / discount / price      (nota_core::validation)    │
//! │  2. load catalog item                    (CatalogRepository)        │
//! │  3. snapshot code/name/price + compute line total (tax engine)      │
//! │  4. insert + recalculate atomically      (TransactionRepository)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation happens before any write, so a rejected input never
//! changes stored state.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::transaction::TransactionFilter;
use nota_core::money::Money;
use nota_core::types::{
    CatalogItem, LineItem, Quantity, StoreProfile, TaxFlags, TaxTotals, Transaction,
    STORE_PROFILE_ID,
};
use nota_core::{tax, validation};

// =============================================================================
// Input Types
// =============================================================================

/// Input for creating a transaction.
///
/// Only the customer name is mandatory; everything else is optional
/// header data. Without an explicit number one is generated.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Explicit business number; generated when `None`.
    pub transaction_number: Option<String>,
    pub transaction_date: NaiveDate,
    pub customer_name: String,
    pub customer_address: Option<String>,
    pub treasurer_name: Option<String>,
    pub courier: Option<String>,
    pub notes: Option<String>,
    pub buyer_npwp: Option<String>,
    pub service_type: Option<String>,
    pub service_value_cents: Option<i64>,
    pub flags: TaxFlags,
}

impl NewTransaction {
    /// Creates a minimal new-transaction input for today's date.
    pub fn new(customer_name: impl Into<String>, transaction_date: NaiveDate) -> Self {
        NewTransaction {
            transaction_number: None,
            transaction_date,
            customer_name: customer_name.into(),
            customer_address: None,
            treasurer_name: None,
            courier: None,
            notes: None,
            buyer_npwp: None,
            service_type: None,
            service_value_cents: None,
            flags: TaxFlags::default(),
        }
    }
}

// =============================================================================
// Service
// =============================================================================

/// High-level transaction operations.
///
/// ## Usage
/// ```rust,ignore
/// let service = TransactionService::new(db);
///
/// let txn = service.create_transaction(input).await?;
/// let (item, totals) = service
///     .add_item(&txn.id, &catalog_id, Quantity::from_units(2), None, 1000)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionService {
    db: Database,
}

impl TransactionService {
    /// Creates a new TransactionService over a database handle.
    pub fn new(db: Database) -> Self {
        TransactionService { db }
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Creates a new transaction with no items and all totals zero.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - bad customer name / number / NPWP
    /// * `Err(DbError::UniqueViolation)` - explicit number already taken
    pub async fn create_transaction(&self, input: NewTransaction) -> DbResult<Transaction> {
        validation::validate_customer_name(&input.customer_name)?;

        if let Some(npwp) = &input.buyer_npwp {
            validation::validate_npwp(npwp)?;
        }
        if let Some(cents) = input.service_value_cents {
            validation::validate_service_value_cents(cents)?;
        }

        let transaction_number = match input.transaction_number {
            Some(number) => {
                validation::validate_transaction_number(&number)?;
                number.trim().to_string()
            }
            None => generate_transaction_number(input.transaction_date),
        };

        let now = Utc::now();
        let txn = Transaction {
            id: Uuid::new_v4().to_string(),
            transaction_number,
            transaction_date: input.transaction_date,
            customer_name: input.customer_name.trim().to_string(),
            customer_address: input.customer_address,
            treasurer_name: input.treasurer_name,
            courier: input.courier,
            notes: input.notes,
            buyer_npwp: input.buyer_npwp,
            service_type: input.service_type,
            service_value_cents: input.service_value_cents,
            flags: input.flags,
            totals: TaxTotals::zeroed(),
            created_at: now,
            updated_at: now,
        };

        let created = self.db.transactions().insert(&txn).await?;

        info!(
            transaction_number = %created.transaction_number,
            "Transaction created"
        );

        Ok(created)
    }

    /// Gets a transaction by ID.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no such transaction
    pub async fn get_transaction(&self, id: &str) -> DbResult<Transaction> {
        self.db
            .transactions()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))
    }

    /// Gets a transaction by its business number.
    pub async fn get_transaction_by_number(&self, number: &str) -> DbResult<Transaction> {
        self.db
            .transactions()
            .get_by_number(number)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", number))
    }

    /// Gets a transaction together with its line items, in insertion
    /// order. This pair is the snapshot a document renderer consumes.
    pub async fn get_transaction_with_items(
        &self,
        id: &str,
    ) -> DbResult<(Transaction, Vec<LineItem>)> {
        let txn = self.get_transaction(id).await?;
        let items = self.db.transactions().get_items(id).await?;
        Ok((txn, items))
    }

    /// Lists transactions matching the filter, newest first.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> DbResult<Vec<Transaction>> {
        if let Some(name) = &filter.customer_name {
            validation::validate_search_query(name)?;
        }
        self.db.transactions().list(filter).await
    }

    /// Updates a transaction's descriptive header fields.
    ///
    /// The business number is immutable; tax settings go through
    /// [`Self::update_tax_settings`] because they trigger
    /// recalculation.
    pub async fn update_header(&self, txn: &Transaction) -> DbResult<()> {
        validation::validate_customer_name(&txn.customer_name)?;
        if let Some(npwp) = &txn.buyer_npwp {
            validation::validate_npwp(npwp)?;
        }
        self.db.transactions().update_header(txn).await
    }

    /// Deletes a transaction and all of its line items.
    pub async fn delete_transaction(&self, id: &str) -> DbResult<()> {
        self.db.transactions().delete(id).await
    }

    // =========================================================================
    // Line Items
    // =========================================================================

    /// Adds an item from the catalog to a transaction.
    ///
    /// The catalog item's code, name, and unit price are snapshotted
    /// into the line item; `unit_price_override` substitutes a
    /// negotiated price for the catalog one. The line total and the
    /// transaction totals are recomputed atomically with the insert.
    ///
    /// ## Returns
    /// * `Ok((LineItem, TaxTotals))` - the stored item and fresh totals
    /// * `Err(DbError::NotFound)` - transaction or catalog item missing
    /// * `Err(DbError::Validation)` - bad quantity / discount / price
    pub async fn add_item(
        &self,
        transaction_id: &str,
        catalog_item_id: &str,
        quantity: Quantity,
        unit_price_override: Option<Money>,
        discount_bps: u32,
    ) -> DbResult<(LineItem, TaxTotals)> {
        validation::validate_quantity_millis(quantity.millis())?;
        validation::validate_discount_bps(discount_bps)?;

        let catalog_item = self
            .db
            .catalog()
            .get_by_id(catalog_item_id)
            .await?
            .ok_or_else(|| DbError::not_found("CatalogItem", catalog_item_id))?;

        let unit_price = unit_price_override.unwrap_or_else(|| catalog_item.unit_price());
        validation::validate_unit_price_cents(unit_price.cents())?;

        let line_total = tax::line_total(quantity, unit_price, discount_bps);

        let item = LineItem {
            id: Uuid::new_v4().to_string(),
            transaction_id: transaction_id.to_string(),
            catalog_item_id: catalog_item.id.clone(),
            item_code: catalog_item.item_code.clone(),
            item_name: catalog_item.item_name.clone(),
            quantity_millis: quantity.millis(),
            unit_price_cents: unit_price.cents(),
            discount_bps,
            line_total_cents: line_total.cents(),
            created_at: Utc::now(),
        };

        let totals = self.db.transactions().add_item(&item).await?;

        debug!(
            transaction_id = %transaction_id,
            item_code = %item.item_code,
            line_total_cents = item.line_total_cents,
            total_cents = totals.total_cents,
            "Item added"
        );

        Ok((item, totals))
    }

    /// Removes a line item and recalculates the owning transaction.
    ///
    /// Removing the last item leaves a valid empty transaction with
    /// every derived amount at zero.
    pub async fn remove_item(&self, line_item_id: &str) -> DbResult<TaxTotals> {
        self.db.transactions().remove_item(line_item_id).await
    }

    /// Recalculates a transaction's totals from its current items.
    ///
    /// Idempotent repair operation; item mutations already recalculate
    /// on their own.
    pub async fn recalculate(&self, transaction_id: &str) -> DbResult<TaxTotals> {
        self.db.transactions().recalculate(transaction_id).await
    }

    /// Updates a transaction's tax configuration and recalculates.
    pub async fn update_tax_settings(
        &self,
        transaction_id: &str,
        flags: TaxFlags,
        service_type: Option<String>,
        service_value_cents: Option<i64>,
    ) -> DbResult<TaxTotals> {
        if let Some(cents) = service_value_cents {
            validation::validate_service_value_cents(cents)?;
        }

        self.db
            .transactions()
            .update_tax_settings(transaction_id, flags, service_type, service_value_cents)
            .await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Creates a catalog item.
    pub async fn create_catalog_item(
        &self,
        item_code: &str,
        item_name: &str,
        description: Option<String>,
        unit_price: Money,
        is_service: bool,
    ) -> DbResult<CatalogItem> {
        validation::validate_item_code(item_code)?;
        validation::validate_item_name(item_name)?;
        validation::validate_unit_price_cents(unit_price.cents())?;

        let now = Utc::now();
        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            item_code: item_code.trim().to_string(),
            item_name: item_name.trim().to_string(),
            description,
            unit_price_cents: unit_price.cents(),
            is_service,
            created_at: now,
            updated_at: now,
        };

        self.db.catalog().insert(&item).await
    }

    /// Searches the catalog by code or name.
    pub async fn search_catalog(&self, query: &str, limit: u32) -> DbResult<Vec<CatalogItem>> {
        let query = validation::validate_search_query(query)?;
        self.db.catalog().search(&query, limit).await
    }

    /// Deletes a catalog item (blocked while referenced).
    pub async fn delete_catalog_item(&self, id: &str) -> DbResult<()> {
        self.db.catalog().delete(id).await
    }

    // =========================================================================
    // Store Profile
    // =========================================================================

    /// Gets the store profile, if one has been saved.
    pub async fn store_profile(&self) -> DbResult<Option<StoreProfile>> {
        self.db.store_profile().get().await
    }

    /// Saves the store profile (create and update are the same upsert).
    pub async fn save_store_profile(&self, profile: &StoreProfile) -> DbResult<StoreProfile> {
        if profile.store_name.trim().is_empty() {
            return Err(DbError::Validation(
                nota_core::ValidationError::Required {
                    field: "store_name".to_string(),
                },
            ));
        }
        if let Some(npwp) = &profile.npwp {
            validation::validate_npwp(npwp)?;
        }

        let mut profile = profile.clone();
        profile.id = STORE_PROFILE_ID;
        self.db.store_profile().upsert(&profile).await
    }
}

// =============================================================================
// Number Generation
// =============================================================================

/// Generates a transaction number of the form `TRX-YYYYMMDD-XXXXXXXX`.
///
/// The suffix comes from a fresh UUID, so collisions are practically
/// impossible; the UNIQUE constraint on the column is the hard backstop.
pub fn generate_transaction_number(date: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "TRX-{}-{}",
        date.format("%Y%m%d"),
        &suffix[..8].to_uppercase()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use nota_core::MAX_DISCOUNT_BPS;

    #[test]
    fn test_generate_transaction_number_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let number = generate_transaction_number(date);

        assert!(number.starts_with("TRX-20260314-"));
        assert_eq!(number.len(), "TRX-20260314-".len() + 8);
    }

    #[test]
    fn test_generated_numbers_are_distinct() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let a = generate_transaction_number(date);
        let b = generate_transaction_number(date);
        assert_ne!(a, b);
    }

    // =========================================================================
    // Test Helpers
    // =========================================================================

    async fn test_service() -> TransactionService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        TransactionService::new(db)
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    async fn seed_item(
        service: &TransactionService,
        code: &str,
        price_cents: i64,
    ) -> CatalogItem {
        service
            .create_catalog_item(code, &format!("Item {}", code), None, Money::from_cents(price_cents), false)
            .await
            .unwrap()
    }

    /// Flags of an institutional goods purchase: PPN, local tax, PPh22.
    fn institutional_flags() -> TaxFlags {
        TaxFlags {
            vat_enabled: true,
            local_tax_enabled: true,
            pph22_enabled: true,
            pph23_enabled: false,
        }
    }

    // =========================================================================
    // Transaction Lifecycle
    // =========================================================================

    #[tokio::test]
    async fn test_create_transaction_starts_zeroed() {
        let service = test_service().await;

        let txn = service
            .create_transaction(NewTransaction::new("Dinas Pendidikan", test_date()))
            .await
            .unwrap();

        assert_eq!(txn.totals, TaxTotals::zeroed());
        assert!(txn.transaction_number.starts_with("TRX-20260314-"));

        let fetched = service.get_transaction(&txn.id).await.unwrap();
        assert_eq!(fetched.transaction_number, txn.transaction_number);
    }

    #[tokio::test]
    async fn test_duplicate_transaction_number_rejected() {
        let service = test_service().await;

        let mut input = NewTransaction::new("Dinas A", test_date());
        input.transaction_number = Some("TRX-001".to_string());
        service.create_transaction(input.clone()).await.unwrap();

        input.customer_name = "Dinas B".to_string();
        let err = service.create_transaction(input).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_institutional_purchase_totals() {
        // 2 × Rp100.000 at 10% discount, PPN + local tax + PPh22:
        // subtotal 180.000, PPN 19.800, local 1.800, PPh22 2.700
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 10_000_000).await;

        let mut input = NewTransaction::new("Dinas Pendidikan", test_date());
        input.flags = institutional_flags();
        let txn = service.create_transaction(input).await.unwrap();

        let (line, totals) = service
            .add_item(&txn.id, &item.id, Quantity::from_units(2), None, 1000)
            .await
            .unwrap();

        assert_eq!(line.line_total_cents, 18_000_000);
        assert_eq!(totals.subtotal_cents, 18_000_000);
        assert_eq!(totals.vat_cents, 1_980_000);
        assert_eq!(totals.local_tax_cents, 180_000);
        assert_eq!(totals.pph22_cents, 270_000);
        assert_eq!(totals.pph23_cents, 0);
        assert!(!totals.stamp_duty_required);
        assert_eq!(totals.total_cents, 20_430_000);

        // Stored state matches what the mutation returned
        let stored = service.get_transaction(&txn.id).await.unwrap();
        assert_eq!(stored.totals, totals);
    }

    #[tokio::test]
    async fn test_adding_item_crosses_stamp_duty_threshold() {
        let service = test_service().await;
        let cheap = seed_item(&service, "ATK-001", 100_000_000).await; // Rp1.000.000
        let bulk = seed_item(&service, "KRT-001", 450_000_000).await; // Rp4.500.000

        let txn = service
            .create_transaction(NewTransaction::new("Dinas Kesehatan", test_date()))
            .await
            .unwrap();

        let (_, totals) = service
            .add_item(&txn.id, &cheap.id, Quantity::from_units(1), None, 0)
            .await
            .unwrap();
        assert!(!totals.stamp_duty_required);

        // Second item pushes the base to Rp5.500.000 ≥ Rp5.000.000
        let (_, totals) = service
            .add_item(&txn.id, &bulk.id, Quantity::from_units(1), None, 0)
            .await
            .unwrap();
        assert!(totals.stamp_duty_required);
        assert_eq!(totals.stamp_duty_cents, 1_000_000);
        assert_eq!(totals.total_cents, 551_000_000);
    }

    #[tokio::test]
    async fn test_removing_last_item_zeroes_everything() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 10_000_000).await;

        let mut input = NewTransaction::new("Dinas Pendidikan", test_date());
        input.flags = institutional_flags();
        let txn = service.create_transaction(input).await.unwrap();

        let (line, totals) = service
            .add_item(&txn.id, &item.id, Quantity::from_units(2), None, 0)
            .await
            .unwrap();
        assert!(totals.total_cents > 0);

        let totals = service.remove_item(&line.id).await.unwrap();
        assert_eq!(totals, TaxTotals::zeroed());

        let stored = service.get_transaction(&txn.id).await.unwrap();
        assert_eq!(stored.totals, TaxTotals::zeroed());
    }

    #[tokio::test]
    async fn test_add_unknown_catalog_item_changes_nothing() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 5_000_000).await;

        let txn = service
            .create_transaction(NewTransaction::new("Dinas Sosial", test_date()))
            .await
            .unwrap();
        service
            .add_item(&txn.id, &item.id, Quantity::from_units(1), None, 0)
            .await
            .unwrap();
        let before = service.get_transaction(&txn.id).await.unwrap();

        let missing = Uuid::new_v4().to_string();
        let err = service
            .add_item(&txn.id, &missing, Quantity::from_units(1), None, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // No item row written, totals untouched
        let (after, items) = service.get_transaction_with_items(&txn.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(after.totals, before.totals);
    }

    #[tokio::test]
    async fn test_fractional_quantity_line() {
        let service = test_service().await;
        let item = seed_item(&service, "CTK-001", 2_000_000).await; // Rp20.000

        let txn = service
            .create_transaction(NewTransaction::new("PT Maju", test_date()))
            .await
            .unwrap();

        // 1.5 × Rp20.000 = Rp30.000
        let (line, totals) = service
            .add_item(&txn.id, &item.id, Quantity::from_millis(1500), None, 0)
            .await
            .unwrap();
        assert_eq!(line.line_total_cents, 3_000_000);
        assert_eq!(totals.subtotal_cents, 3_000_000);
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected_before_write() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 5_000_000).await;

        let txn = service
            .create_transaction(NewTransaction::new("Dinas Sosial", test_date()))
            .await
            .unwrap();

        // Zero quantity
        let err = service
            .add_item(&txn.id, &item.id, Quantity::from_millis(0), None, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        // Discount over 100%
        let err = service
            .add_item(
                &txn.id,
                &item.id,
                Quantity::from_units(1),
                None,
                MAX_DISCOUNT_BPS + 1,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let (_, items) = service.get_transaction_with_items(&txn.id).await.unwrap();
        assert!(items.is_empty());
    }

    // =========================================================================
    // Tax Settings
    // =========================================================================

    #[tokio::test]
    async fn test_disabling_flag_zeroes_stored_amount() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 10_000_000).await;

        let mut input = NewTransaction::new("Dinas Pendidikan", test_date());
        input.flags = institutional_flags();
        let txn = service.create_transaction(input).await.unwrap();
        service
            .add_item(&txn.id, &item.id, Quantity::from_units(2), None, 0)
            .await
            .unwrap();

        let totals = service
            .update_tax_settings(
                &txn.id,
                TaxFlags {
                    vat_enabled: false,
                    ..institutional_flags()
                },
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(totals.vat_cents, 0);
        assert!(totals.local_tax_cents > 0);

        let stored = service.get_transaction(&txn.id).await.unwrap();
        assert_eq!(stored.totals.vat_cents, 0);
    }

    #[tokio::test]
    async fn test_pph23_from_service_value() {
        let service = test_service().await;
        let item = seed_item(&service, "CTK-001", 100_000_000).await;

        let txn = service
            .create_transaction(NewTransaction::new("Dinas PU", test_date()))
            .await
            .unwrap();
        service
            .add_item(&txn.id, &item.id, Quantity::from_units(1), None, 0)
            .await
            .unwrap();

        let flags = TaxFlags {
            pph23_enabled: true,
            ..TaxFlags::default()
        };

        // 2% of the Rp500.000 service value = Rp10.000
        let totals = service
            .update_tax_settings(
                &txn.id,
                flags,
                Some("Jasa instalasi".to_string()),
                Some(50_000_000),
            )
            .await
            .unwrap();
        assert_eq!(totals.pph23_cents, 1_000_000);
        // Raw service value is not in the total, only its withholding
        assert_eq!(totals.total_cents, 100_000_000 + 1_000_000);

        // Flag on but value cleared → PPh23 back to zero
        let totals = service
            .update_tax_settings(&txn.id, flags, None, None)
            .await
            .unwrap();
        assert_eq!(totals.pph23_cents, 0);
    }

    #[tokio::test]
    async fn test_recalculate_is_idempotent() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 33_333_333).await;

        let mut input = NewTransaction::new("Dinas Pendidikan", test_date());
        input.flags = institutional_flags();
        let txn = service.create_transaction(input).await.unwrap();
        service
            .add_item(&txn.id, &item.id, Quantity::from_units(3), None, 750)
            .await
            .unwrap();

        let first = service.recalculate(&txn.id).await.unwrap();
        let second = service.recalculate(&txn.id).await.unwrap();
        assert_eq!(first, second);
    }

    // =========================================================================
    // Catalog & Profile
    // =========================================================================

    #[tokio::test]
    async fn test_catalog_delete_blocked_while_referenced() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 5_000_000).await;

        let txn = service
            .create_transaction(NewTransaction::new("Dinas Sosial", test_date()))
            .await
            .unwrap();
        let (line, _) = service
            .add_item(&txn.id, &item.id, Quantity::from_units(1), None, 0)
            .await
            .unwrap();

        let err = service.delete_catalog_item(&item.id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        // Once unreferenced, deletion goes through
        service.remove_item(&line.id).await.unwrap();
        service.delete_catalog_item(&item.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_deleting_transaction_cascades_to_items() {
        let service = test_service().await;
        let item = seed_item(&service, "ATK-001", 5_000_000).await;

        let txn = service
            .create_transaction(NewTransaction::new("Dinas Sosial", test_date()))
            .await
            .unwrap();
        service
            .add_item(&txn.id, &item.id, Quantity::from_units(1), None, 0)
            .await
            .unwrap();

        service.delete_transaction(&txn.id).await.unwrap();

        let err = service.get_transaction(&txn.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // With its line item gone, the catalog item is deletable again
        service.delete_catalog_item(&item.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_profile_upsert() {
        let service = test_service().await;

        assert!(service.store_profile().await.unwrap().is_none());

        let profile = StoreProfile {
            id: STORE_PROFILE_ID,
            store_name: "Toko Sumber Rejeki".to_string(),
            address: None,
            city: Some("Semarang".to_string()),
            phone: None,
            email: None,
            npwp: Some("01.234.567.8-901.000".to_string()),
            owner_name: None,
            updated_at: Utc::now(),
        };
        service.save_store_profile(&profile).await.unwrap();

        // Saving again replaces the same row
        let mut renamed = profile.clone();
        renamed.store_name = "Toko Sumber Rejeki Baru".to_string();
        service.save_store_profile(&renamed).await.unwrap();

        let stored = service.store_profile().await.unwrap().unwrap();
        assert_eq!(stored.id, STORE_PROFILE_ID);
        assert_eq!(stored.store_name, "Toko Sumber Rejeki Baru");
    }

    #[tokio::test]
    async fn test_list_transactions_filters() {
        let service = test_service().await;

        let mut a = NewTransaction::new("Dinas Pendidikan", test_date());
        a.transaction_number = Some("TRX-A".to_string());
        service.create_transaction(a).await.unwrap();

        let mut b = NewTransaction::new(
            "PT Maju Bersama",
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        );
        b.transaction_number = Some("TRX-B".to_string());
        service.create_transaction(b).await.unwrap();

        // Case-insensitive customer filter
        let filter = TransactionFilter {
            customer_name: Some("dinas".to_string()),
            ..TransactionFilter::new()
        };
        let found = service.list_transactions(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].transaction_number, "TRX-A");

        // Date range covers only the later transaction
        let filter = TransactionFilter {
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1),
            ..TransactionFilter::new()
        };
        let found = service.list_transactions(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].transaction_number, "TRX-B");

        // No filter → both, newest date first
        let found = service
            .list_transactions(&TransactionFilter::new())
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].transaction_number, "TRX-B");
    }
}
