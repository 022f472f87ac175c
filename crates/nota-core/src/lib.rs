//! # nota-core: Pure Business Logic for Nota
//!
//! This crate is the **heart** of Nota, a transaction and tax-document
//! engine for Indonesian retail and institutional sales. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Nota Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │           Caller (UI / API / document renderer)             │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                 ★ nota-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐     │   │
//! │  │  │  types   │ │  money   │ │   tax    │ │ validation │     │   │
//! │  │  │ LineItem │ │  Money   │ │ PPN/PPh  │ │   rules    │     │   │
//! │  │  │ Txn etc. │ │ TaxRate  │ │ meterai  │ │   checks   │     │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └────────────┘     │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                  nota-db (Database Layer)                   │   │
//! │  │       SQLite repositories, migrations, recalculation        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Transaction, LineItem, CatalogItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tax`] - Tax Rule Engine (PPN, local tax, PPh22/23, stamp duty)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every derived amount is reproducible from its
//!    inputs; recalculation is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use nota_core::money::Money;
//! use nota_core::tax;
//! use nota_core::types::{Quantity, TaxFlags};
//!
//! // 2 × Rp100.000 at 10% discount
//! let subtotal = tax::line_total(
//!     Quantity::from_units(2),
//!     Money::from_cents(10_000_000),
//!     1000,
//! );
//! assert_eq!(subtotal.cents(), 18_000_000);
//!
//! let flags = TaxFlags {
//!     vat_enabled: true,
//!     pph22_enabled: true,
//!     ..TaxFlags::default()
//! };
//! let totals = tax::calculate(subtotal, None, flags);
//! assert_eq!(totals.vat_cents, 1_980_000); // 11% PPN
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use nota_core::Money` instead of
// `use nota_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item, in milli-units (999,999 units).
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 1000000 instead of 100).
pub const MAX_QUANTITY_MILLIS: i64 = 999_999_000;

/// Maximum discount in basis points (100%).
pub const MAX_DISCOUNT_BPS: u32 = 10_000;

/// Maximum line items allowed in a single transaction.
///
/// ## Business Reason
/// Keeps generated documents to a printable size.
pub const MAX_LINE_ITEMS: usize = 200;
