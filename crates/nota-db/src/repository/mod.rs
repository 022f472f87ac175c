//! # Repository Layer
//!
//! Database access organized by aggregate:
//!
//! - [`catalog`] - goods/service definitions
//! - [`transaction`] - transaction headers, line items, recalculation
//! - [`profile`] - the singleton store profile
//!
//! Repositories hold a cloned pool handle and are cheap to construct;
//! [`crate::Database`] hands them out on demand.

pub mod catalog;
pub mod profile;
pub mod transaction;

pub use catalog::CatalogRepository;
pub use profile::StoreProfileRepository;
pub use transaction::{TransactionFilter, TransactionRepository};
