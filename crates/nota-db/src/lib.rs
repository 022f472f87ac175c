//! # nota-db: Database Layer for Nota
//!
//! SQLite persistence for transactions, line items, the catalog, and
//! the store profile, plus the recalculation orchestration that keeps
//! every transaction's derived totals consistent with its items.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │           Caller (UI / API / document renderer)                     │
//! └────────────────────────────┬────────────────────────────────────────┘
//! ┌────────────────────────────▼────────────────────────────────────────┐
//! │                   ★ nota-db (THIS CRATE) ★                          │
//! │                                                                     │
//! │  ┌──────────────┐  ┌───────────────┐  ┌──────────────────────┐     │
//! │  │   service    │  │  repository   │  │   pool / migrations  │     │
//! │  │  validation, │  │  catalog,     │  │   WAL SQLite pool,   │     │
//! │  │  snapshots,  │  │  transaction, │  │   embedded schema    │     │
//! │  │  recalc      │  │  profile      │  │                      │     │
//! │  └──────────────┘  └───────────────┘  └──────────────────────┘     │
//! └────────────────────────────┬────────────────────────────────────────┘
//! ┌────────────────────────────▼────────────────────────────────────────┐
//! │              nota-core (pure business logic, no I/O)                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust,ignore
//! use nota_db::{Database, DbConfig, TransactionService};
//!
//! let db = Database::new(DbConfig::new("./nota.db")).await?;
//! let service = TransactionService::new(db);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{
    CatalogRepository, StoreProfileRepository, TransactionFilter, TransactionRepository,
};
pub use service::{NewTransaction, TransactionService};
