//! # Tax Rule Engine
//!
//! Pure functions that derive every tax-related amount of a transaction
//! from its subtotal, optional service value, and enabled-tax flags.
//!
//! ## Rule Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Tax          Enabled by          Base            Rate              │
//! │  ───────────  ─────────────────   ─────────────   ────              │
//! │  PPN (VAT)    vat_enabled         subtotal        11%               │
//! │  Local tax    local_tax_enabled   subtotal        1%                │
//! │  PPh22        pph22_enabled       subtotal        1.5%              │
//! │  PPh23        pph23_enabled AND   service value   2%                │
//! │               service value set                                     │
//! │                                                                     │
//! │  Stamp duty (bea meterai):                                          │
//! │    base  = subtotal + PPN + local tax + PPh22 + PPh23               │
//! │    base >= Rp5.000.000  →  flat Rp10.000                            │
//! │                                                                     │
//! │  total = base + stamp duty                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Function, Every Call Site
//! Both mutation paths (add item, remove item) and every explicit
//! recalculation funnel through [`calculate`]. There is deliberately no
//! second copy of the rate table anywhere, so the amounts on a document
//! cannot depend on which operation last touched the transaction.
//!
//! All withholding components (PPh22/PPh23) are carried additively in
//! the grand total: on institutional invoices the treasurer remits the
//! withheld amounts, so the document total includes them.

use crate::money::Money;
use crate::types::{Quantity, TaxFlags, TaxRate, TaxTotals};

// =============================================================================
// Domain Constants
// =============================================================================
// Fixed by regulation, not configurable per transaction. The enable
// flags are the only per-transaction knobs.

/// PPN (value-added tax): 11% of subtotal.
pub const VAT_RATE: TaxRate = TaxRate::from_bps(1100);

/// Local/regional tax: 1% of subtotal.
pub const LOCAL_TAX_RATE: TaxRate = TaxRate::from_bps(100);

/// PPh22 withholding on goods purchases: 1.5% of subtotal.
pub const PPH22_RATE: TaxRate = TaxRate::from_bps(150);

/// PPh23 withholding on services: 2% of the service value.
pub const PPH23_RATE: TaxRate = TaxRate::from_bps(200);

/// Stamp duty threshold: documents totalling Rp5.000.000 or more
/// (before the duty itself) require a meterai.
pub const STAMP_DUTY_THRESHOLD: Money = Money::from_cents(500_000_000);

/// Flat stamp duty amount: Rp10.000.
pub const STAMP_DUTY_AMOUNT: Money = Money::from_cents(1_000_000);

// =============================================================================
// Line-Item Math
// =============================================================================

/// Computes a single line's monetary contribution.
///
/// `quantity × unit_price × (1 - discount/100)`, rounded to currency
/// precision. Pure; validation of the inputs (positive quantity and
/// price, discount within 0..=100%) happens before construction, in
/// [`crate::validation`].
///
/// ## Example
/// ```rust
/// use nota_core::money::Money;
/// use nota_core::tax::line_total;
/// use nota_core::types::Quantity;
///
/// // 2 × Rp100.000 at 10% discount = Rp180.000
/// let total = line_total(
///     Quantity::from_units(2),
///     Money::from_cents(10_000_000),
///     1000,
/// );
/// assert_eq!(total.cents(), 18_000_000);
/// ```
pub fn line_total(quantity: Quantity, unit_price: Money, discount_bps: u32) -> Money {
    unit_price
        .multiply_quantity(quantity)
        .apply_percentage_discount(discount_bps)
}

/// Sums line totals into a subtotal.
///
/// Commutative integer sum: invariant under reordering of the item
/// list. An empty set yields zero.
pub fn sum_line_totals<I>(line_totals: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    line_totals
        .into_iter()
        .fold(Money::zero(), |acc, t| acc + t)
}

// =============================================================================
// Recalculation
// =============================================================================

/// Derives the full totals group from a subtotal, an optional service
/// value, and the enabled-tax flags.
///
/// Deterministic and side-effect free: calling it twice with the same
/// inputs yields identical groups. A disabled flag forces its amount
/// to exactly zero regardless of any previously stored value; PPh23
/// additionally requires a service value to be present. The raw
/// service value itself is never part of the stamp-duty base, only its
/// derived PPh23 is.
///
/// ## Example
/// ```rust
/// use nota_core::money::Money;
/// use nota_core::tax::calculate;
/// use nota_core::types::TaxFlags;
///
/// let flags = TaxFlags {
///     vat_enabled: true,
///     local_tax_enabled: true,
///     pph22_enabled: true,
///     pph23_enabled: false,
/// };
/// let totals = calculate(Money::from_cents(18_000_000), None, flags);
/// assert_eq!(totals.vat_cents, 1_980_000);    // 11%
/// assert_eq!(totals.pph22_cents, 270_000);    // 1.5%
/// assert_eq!(totals.total_cents, 20_430_000); // Rp204.300
/// ```
pub fn calculate(subtotal: Money, service_value: Option<Money>, flags: TaxFlags) -> TaxTotals {
    let vat = if flags.vat_enabled {
        subtotal.apply_rate(VAT_RATE)
    } else {
        Money::zero()
    };

    let local_tax = if flags.local_tax_enabled {
        subtotal.apply_rate(LOCAL_TAX_RATE)
    } else {
        Money::zero()
    };

    let pph22 = if flags.pph22_enabled {
        subtotal.apply_rate(PPH22_RATE)
    } else {
        Money::zero()
    };

    let pph23 = match (flags.pph23_enabled, service_value) {
        (true, Some(base)) => base.apply_rate(PPH23_RATE),
        _ => Money::zero(),
    };

    let before_stamp_duty = subtotal + vat + local_tax + pph22 + pph23;

    let stamp_duty_required = before_stamp_duty >= STAMP_DUTY_THRESHOLD;
    let stamp_duty = if stamp_duty_required {
        STAMP_DUTY_AMOUNT
    } else {
        Money::zero()
    };

    TaxTotals {
        subtotal_cents: subtotal.cents(),
        vat_cents: vat.cents(),
        local_tax_cents: local_tax.cents(),
        pph22_cents: pph22.cents(),
        pph23_cents: pph23.cents(),
        stamp_duty_required,
        stamp_duty_cents: stamp_duty.cents(),
        total_cents: (before_stamp_duty + stamp_duty).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flags() -> TaxFlags {
        TaxFlags {
            vat_enabled: true,
            local_tax_enabled: true,
            pph22_enabled: true,
            pph23_enabled: true,
        }
    }

    #[test]
    fn test_line_total_basic() {
        // 2 × Rp100.000, 10% discount → Rp180.000
        let total = line_total(
            Quantity::from_units(2),
            Money::from_cents(10_000_000),
            1000,
        );
        assert_eq!(total.cents(), 18_000_000);
    }

    #[test]
    fn test_line_total_no_discount() {
        let total = line_total(Quantity::from_units(3), Money::from_cents(500_000), 0);
        assert_eq!(total.cents(), 1_500_000);
    }

    #[test]
    fn test_line_total_full_discount() {
        let total = line_total(Quantity::from_units(5), Money::from_cents(999), 10000);
        assert!(total.is_zero());
    }

    #[test]
    fn test_line_total_fractional_quantity() {
        // 1.5 × Rp20.000 = Rp30.000
        let total = line_total(
            Quantity::from_millis(1500),
            Money::from_cents(2_000_000),
            0,
        );
        assert_eq!(total.cents(), 3_000_000);
    }

    #[test]
    fn test_sum_line_totals_empty_is_zero() {
        assert_eq!(sum_line_totals(std::iter::empty()), Money::zero());
    }

    #[test]
    fn test_sum_line_totals_order_independent() {
        let a = vec![
            Money::from_cents(100),
            Money::from_cents(250),
            Money::from_cents(33),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(sum_line_totals(a), sum_line_totals(b));
    }

    #[test]
    fn test_calculate_all_disabled() {
        let totals = calculate(Money::from_cents(18_000_000), None, TaxFlags::default());
        assert_eq!(totals.vat_cents, 0);
        assert_eq!(totals.local_tax_cents, 0);
        assert_eq!(totals.pph22_cents, 0);
        assert_eq!(totals.pph23_cents, 0);
        assert_eq!(totals.total_cents, 18_000_000);
    }

    #[test]
    fn test_calculate_institutional_purchase() {
        // Typical institutional purchase: subtotal Rp180.000 with PPN,
        // local tax and PPh22 enabled, no PPh23.
        let flags = TaxFlags {
            pph23_enabled: false,
            ..all_flags()
        };
        let totals = calculate(Money::from_cents(18_000_000), None, flags);

        assert_eq!(totals.subtotal_cents, 18_000_000);
        assert_eq!(totals.vat_cents, 1_980_000);
        assert_eq!(totals.local_tax_cents, 180_000);
        assert_eq!(totals.pph22_cents, 270_000);
        assert_eq!(totals.pph23_cents, 0);
        assert!(!totals.stamp_duty_required);
        assert_eq!(totals.total_cents, 20_430_000);
    }

    #[test]
    fn test_calculate_pph23_needs_service_value() {
        let flags = TaxFlags {
            pph23_enabled: true,
            ..TaxFlags::default()
        };

        // Flag on, no service value → zero
        let totals = calculate(Money::from_cents(1_000_000), None, flags);
        assert_eq!(totals.pph23_cents, 0);

        // Flag on with service value → 2% of the service value
        let totals = calculate(
            Money::from_cents(1_000_000),
            Some(Money::from_cents(5_000_000)),
            flags,
        );
        assert_eq!(totals.pph23_cents, 100_000);

        // Service value present but flag off → still zero
        let totals = calculate(
            Money::from_cents(1_000_000),
            Some(Money::from_cents(5_000_000)),
            TaxFlags::default(),
        );
        assert_eq!(totals.pph23_cents, 0);
    }

    #[test]
    fn test_disabling_a_flag_zeroes_its_amount() {
        let subtotal = Money::from_cents(18_000_000);
        let enabled = calculate(subtotal, None, all_flags());
        assert!(enabled.vat_cents > 0);

        let disabled = calculate(
            subtotal,
            None,
            TaxFlags {
                vat_enabled: false,
                ..all_flags()
            },
        );
        assert_eq!(disabled.vat_cents, 0);
        // The other amounts are untouched by the VAT flag
        assert_eq!(disabled.local_tax_cents, enabled.local_tax_cents);
        assert_eq!(disabled.pph22_cents, enabled.pph22_cents);
    }

    #[test]
    fn test_stamp_duty_boundary() {
        // Exactly Rp5.000.000 before the duty → required
        let at = calculate(Money::from_cents(500_000_000), None, TaxFlags::default());
        assert!(at.stamp_duty_required);
        assert_eq!(at.stamp_duty_cents, 1_000_000);
        assert_eq!(at.total_cents, 501_000_000);

        // One cent below → not required
        let below = calculate(Money::from_cents(499_999_999), None, TaxFlags::default());
        assert!(!below.stamp_duty_required);
        assert_eq!(below.stamp_duty_cents, 0);
        assert_eq!(below.total_cents, 499_999_999);
    }

    #[test]
    fn test_stamp_duty_base_includes_taxes() {
        // Subtotal below the threshold, but subtotal + PPN crosses it
        let flags = TaxFlags {
            vat_enabled: true,
            ..TaxFlags::default()
        };
        let subtotal = Money::from_cents(460_000_000); // Rp4.600.000
        let totals = calculate(subtotal, None, flags);

        // 4.600.000 + 506.000 PPN = 5.106.000 ≥ threshold
        assert_eq!(totals.vat_cents, 50_600_000);
        assert!(totals.stamp_duty_required);
        assert_eq!(totals.total_cents, 511_600_000);
    }

    #[test]
    fn test_calculate_is_deterministic() {
        let subtotal = Money::from_cents(123_456_789);
        let service = Some(Money::from_cents(7_000_000));
        let first = calculate(subtotal, service, all_flags());
        let second = calculate(subtotal, service, all_flags());
        assert_eq!(first, second);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let totals = calculate(
            Money::from_cents(99_999_999),
            Some(Money::from_cents(12_345_678)),
            all_flags(),
        );
        assert_eq!(
            totals.total_cents,
            totals.subtotal_cents
                + totals.vat_cents
                + totals.local_tax_cents
                + totals.pph22_cents
                + totals.pph23_cents
                + totals.stamp_duty_cents
        );
    }
}
