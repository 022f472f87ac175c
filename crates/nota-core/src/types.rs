//! # Domain Types
//!
//! Core domain types used throughout Nota.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐   ┌──────────────────┐     │
//! │  │  CatalogItem  │   │  Transaction   │   │    LineItem      │     │
//! │  │  ───────────  │   │  ────────────  │   │  ──────────────  │     │
//! │  │  id (UUID)    │   │  id (UUID)     │   │  id (UUID)       │     │
//! │  │  item_code    │   │  transaction_  │   │  transaction_id  │     │
//! │  │  item_name    │   │    number      │   │  item_code (snap)│     │
//! │  │  unit_price   │   │  TaxFlags      │   │  quantity        │     │
//! │  └───────────────┘   │  TaxTotals     │   │  line_total      │     │
//! │                      └────────────────┘   └──────────────────┘     │
//! │                                                                     │
//! │  ┌───────────────┐   ┌────────────────┐   ┌──────────────────┐     │
//! │  │    TaxRate    │   │    Quantity    │   │  StoreProfile    │     │
//! │  │  bps (u32)    │   │  millis (i64)  │   │  singleton row   │     │
//! │  │  1100 = 11%   │   │  1500 = 1.5    │   │  (id always 1)   │     │
//! │  └───────────────┘   └────────────────┘   └──────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (item_code, transaction_number) - human-readable,
//!   unique, what documents and users refer to

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1100 bps = 11% (PPN), 150 bps = 1.5% (PPh22)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A line-item quantity in milli-units (three decimal places).
///
/// ## Why Milli-Units?
/// Goods can be sold fractionally (1.5 kg, 2.25 m). Storing the
/// quantity as an i64 count of thousandths keeps line-total math in
/// exact integer arithmetic, the same way `Money` stays in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use nota_core::types::Quantity;
    ///
    /// assert_eq!(Quantity::from_units(2).millis(), 2000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Creates a quantity from milli-units (1500 = 1.5).
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Quantity(millis)
    }

    /// Returns the quantity in milli-units.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 1000
    }

    /// Checks if the quantity is positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A good or service definition in the catalog.
///
/// Catalog items supply identity and unit price to the transaction
/// engine. Line items snapshot these fields at add time, so editing a
/// catalog item never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, unique across the catalog.
    pub item_code: String,

    /// Display name shown on documents.
    pub item_name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Unit price in cents.
    pub unit_price_cents: i64,

    /// Whether this entry is a service (jasa) rather than goods (barang).
    pub is_service: bool,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item in a transaction.
///
/// Uses the snapshot pattern: `item_code`, `item_name` and
/// `unit_price_cents` are frozen copies taken when the item is added,
/// so later catalog changes leave historical transactions intact.
/// `catalog_item_id` is a weak reference kept only for re-lookup and
/// display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItem {
    pub id: String,
    pub transaction_id: String,
    pub catalog_item_id: String,
    /// Item code at time of adding (frozen).
    pub item_code: String,
    /// Item name at time of adding (frozen).
    pub item_name: String,
    /// Quantity in milli-units (2000 = 2, 1500 = 1.5).
    pub quantity_millis: i64,
    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,
    /// Discount in basis points (1000 = 10%).
    pub discount_bps: u32,
    /// Derived: quantity × unit price × (1 - discount). Never set
    /// independently; recomputed whenever any input changes.
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl LineItem {
    /// Returns the quantity.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_millis(self.quantity_millis)
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Tax Flags
// =============================================================================

/// Which taxes are enabled for a transaction.
///
/// The four flags are independently toggleable. A disabled flag forces
/// its corresponding amount to exactly zero on the next recalculation,
/// regardless of any previously stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TaxFlags {
    /// PPN (value-added tax), 11% of subtotal.
    pub vat_enabled: bool,
    /// Local/regional tax, 1% of subtotal.
    pub local_tax_enabled: bool,
    /// PPh22 withholding, 1.5% of subtotal.
    pub pph22_enabled: bool,
    /// PPh23 withholding, 2% of the service value (requires one).
    pub pph23_enabled: bool,
}

// =============================================================================
// Tax Totals
// =============================================================================

/// The derived monetary fields of a transaction.
///
/// ## Atomicity Invariant
/// These eight fields form one group: they are always recomputed
/// together from the complete current line-item set and written back
/// in a single update. No partial combination is ever persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TaxTotals {
    pub subtotal_cents: i64,
    pub vat_cents: i64,
    pub local_tax_cents: i64,
    pub pph22_cents: i64,
    pub pph23_cents: i64,
    pub stamp_duty_required: bool,
    pub stamp_duty_cents: i64,
    pub total_cents: i64,
}

impl TaxTotals {
    /// A fully zeroed group (state of a freshly created transaction).
    pub const fn zeroed() -> Self {
        TaxTotals {
            subtotal_cents: 0,
            vat_cents: 0,
            local_tax_cents: 0,
            pph22_cents: 0,
            pph23_cents: 0,
            stamp_duty_required: false,
            stamp_duty_cents: 0,
            total_cents: 0,
        }
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A sales transaction: header fields, tax configuration, and the
/// derived totals group.
///
/// A transaction owns its line items (deleting it deletes them). It is
/// never finalized or locked; it stays mutable until deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier, unique across all transactions, immutable.
    pub transaction_number: String,

    /// Date shown on generated documents.
    pub transaction_date: NaiveDate,

    // Descriptive header fields (opaque to the tax engine)
    pub customer_name: String,
    pub customer_address: Option<String>,
    /// Treasurer / principal named on institutional documents.
    pub treasurer_name: Option<String>,
    pub courier: Option<String>,
    pub notes: Option<String>,
    /// Buyer taxpayer identification number (NPWP).
    pub buyer_npwp: Option<String>,

    /// Service description, present when PPh23 applies.
    pub service_type: Option<String>,
    /// PPh23 base in cents; PPh23 is zero without it.
    pub service_value_cents: Option<i64>,

    /// Enabled taxes.
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(flatten)]
    pub flags: TaxFlags,

    /// Derived totals, recomputed on every item mutation.
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(flatten)]
    pub totals: TaxTotals,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the PPh23 base as Money, if set.
    #[inline]
    pub fn service_value(&self) -> Option<Money> {
        self.service_value_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Store Profile
// =============================================================================

/// Row id of the store profile. Only one profile ever exists; the
/// table carries a CHECK constraint pinning the id to this value.
pub const STORE_PROFILE_ID: i64 = 1;

/// The store's own identity, printed on every generated document.
///
/// Modeled as an explicit singleton with upsert semantics: "create"
/// is silently "update" when the row already exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreProfile {
    /// Always [`STORE_PROFILE_ID`].
    pub id: i64,
    pub store_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Store taxpayer identification number.
    pub npwp: Option<String>,
    pub owner_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Document Type
// =============================================================================

/// The tax-document kinds the external renderer can produce from a
/// finalized transaction snapshot. Rendering itself is out of scope;
/// this enum is the selector the renderer receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Nota / invoice.
    Invoice,
    /// Kuitansi (payment receipt).
    Receipt,
    /// Faktur pajak (tax invoice).
    TaxInvoice,
    /// Bukti pembayaran.
    PaymentReceipt,
    /// Berita acara serah terima (delivery handover).
    Bast,
    /// Surat pesanan (order letter).
    OrderLetter,
}

impl DocumentType {
    /// Stable identifier used to pick a template.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::Receipt => "receipt",
            DocumentType::TaxInvoice => "tax_invoice",
            DocumentType::PaymentReceipt => "payment_receipt",
            DocumentType::Bast => "bast",
            DocumentType::OrderLetter => "order_letter",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1100);
        assert_eq!(rate.bps(), 1100);
        assert!((rate.percentage() - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(1.5).bps(), 150);
        assert_eq!(TaxRate::from_percentage(11.0).bps(), 1100);
    }

    #[test]
    fn test_quantity_units() {
        let qty = Quantity::from_units(2);
        assert_eq!(qty.millis(), 2000);
        assert_eq!(qty.units(), 2);
        assert!(qty.is_positive());

        let fractional = Quantity::from_millis(1500);
        assert_eq!(fractional.units(), 1);
    }

    #[test]
    fn test_tax_totals_zeroed() {
        let totals = TaxTotals::zeroed();
        assert_eq!(totals.total_cents, 0);
        assert!(!totals.stamp_duty_required);
        assert_eq!(totals, TaxTotals::default());
    }

    #[test]
    fn test_document_type_identifiers() {
        assert_eq!(DocumentType::Bast.as_str(), "bast");
        assert_eq!(DocumentType::TaxInvoice.as_str(), "tax_invoice");
    }
}
