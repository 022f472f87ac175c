//! # Validation Module
//!
//! Input validation utilities for Nota.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Caller (UI / API)                                         │
//! │  ├── Basic format checks, immediate feedback                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE — business rule validation                    │
//! │  ├── Runs before any mutation; rejection leaves state unchanged     │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL, UNIQUE, foreign key constraints                      │
//! │                                                                     │
//! │  Defense in depth: each layer catches different errors              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DISCOUNT_BPS, MAX_QUANTITY_MILLIS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog item code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use nota_core::validation::validate_item_code;
///
/// assert!(validate_item_code("ATK-001").is_ok());
/// assert!(validate_item_code("").is_err());
/// ```
pub fn validate_item_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "item_code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "item_code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "item_code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "item_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a transaction number (business identifier).
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
pub fn validate_transaction_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "transaction_number".to_string(),
        });
    }

    if number.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "transaction_number".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an NPWP (taxpayer identification number).
///
/// ## Rules
/// - Length check only: 15 or 16 digits once punctuation is stripped
/// - Digits, dots, and hyphens allowed in the written form
///
/// The check is deliberately shallow; beyond basic shape the NPWP is
/// an opaque descriptive field printed on documents as entered.
pub fn validate_npwp(npwp: &str) -> ValidationResult<()> {
    let npwp = npwp.trim();

    if npwp.is_empty() {
        return Err(ValidationError::Required {
            field: "npwp".to_string(),
        });
    }

    if !npwp.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return Err(ValidationError::InvalidFormat {
            field: "npwp".to_string(),
            reason: "must contain only digits, dots, and hyphens".to_string(),
        });
    }

    let digits = npwp.chars().filter(|c| c.is_ascii_digit()).count();
    if digits != 15 && digits != 16 {
        return Err(ValidationError::InvalidFormat {
            field: "npwp".to_string(),
            reason: "must contain 15 or 16 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a search/filter query string.
///
/// ## Rules
/// - Can be empty (no filtering)
/// - At most 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity in milli-units.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_QUANTITY_MILLIS
pub fn validate_quantity_millis(millis: i64) -> ValidationResult<()> {
    if millis <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if millis > MAX_QUANTITY_MILLIS {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY_MILLIS,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be positive (> 0); a zero-priced line would make the derived
///   totals meaningless on a tax document
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_DISCOUNT_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: MAX_DISCOUNT_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a service value in cents (PPh23 base).
///
/// ## Rules
/// - When present, must be positive
pub fn validate_service_value_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "service_value".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use nota_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_code() {
        assert!(validate_item_code("ATK-001").is_ok());
        assert!(validate_item_code("JASA_01").is_ok());

        assert!(validate_item_code("").is_err());
        assert!(validate_item_code("   ").is_err());
        assert!(validate_item_code("has space").is_err());
        assert!(validate_item_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Kertas HVS A4 70gsm").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity_millis() {
        assert!(validate_quantity_millis(1).is_ok());
        assert!(validate_quantity_millis(2000).is_ok());
        assert!(validate_quantity_millis(MAX_QUANTITY_MILLIS).is_ok());

        assert!(validate_quantity_millis(0).is_err());
        assert!(validate_quantity_millis(-1).is_err());
        assert!(validate_quantity_millis(MAX_QUANTITY_MILLIS + 1).is_err());
    }

    #[test]
    fn test_validate_unit_price_cents() {
        assert!(validate_unit_price_cents(1).is_ok());
        assert!(validate_unit_price_cents(10_000_000).is_ok());
        assert!(validate_unit_price_cents(0).is_err());
        assert!(validate_unit_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(1000).is_ok());
        assert!(validate_discount_bps(10000).is_ok());
        assert!(validate_discount_bps(10001).is_err());
    }

    #[test]
    fn test_validate_npwp() {
        // 15-digit classic format with punctuation
        assert!(validate_npwp("01.234.567.8-901.000").is_ok());
        // 16-digit bare format
        assert!(validate_npwp("0123456789012345").is_ok());

        assert!(validate_npwp("").is_err());
        assert!(validate_npwp("abc").is_err());
        assert!(validate_npwp("123").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_transaction_number() {
        assert!(validate_transaction_number("TRX-2026-0001").is_ok());
        assert!(validate_transaction_number("").is_err());
        assert!(validate_transaction_number(&"A".repeat(65)).is_err());
    }
}
