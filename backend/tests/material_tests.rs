//! Material ledger tests
//!
//! Covers the clamp-at-zero adjustment invariant, the derived stock status
//! rule, and isolation between materials.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{apply_stock_delta, derive_material_status, MaterialStatus};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Status derives to Aman at or above the minimum
    #[test]
    fn test_status_at_threshold() {
        assert_eq!(
            derive_material_status(dec("5"), dec("5")),
            MaterialStatus::Aman
        );
        assert_eq!(
            derive_material_status(dec("100"), dec("20")),
            MaterialStatus::Aman
        );
    }

    /// Status derives to Stok Rendah strictly below the minimum
    #[test]
    fn test_status_below_threshold() {
        assert_eq!(
            derive_material_status(dec("4.999"), dec("5")),
            MaterialStatus::StokRendah
        );
    }

    /// Wire representation of the derived status
    #[test]
    fn test_status_labels() {
        assert_eq!(MaterialStatus::Aman.as_str(), "Aman");
        assert_eq!(MaterialStatus::StokRendah.as_str(), "Stok Rendah");
    }

    /// Deduction with sufficient stock applies exactly
    #[test]
    fn test_deduction_applies() {
        assert_eq!(apply_stock_delta(dec("10"), dec("-2.5")), dec("7.5"));
    }

    /// Over-deduction clamps to zero instead of going negative
    #[test]
    fn test_over_deduction_clamps() {
        assert_eq!(apply_stock_delta(dec("10"), dec("-12")), Decimal::ZERO);
    }

    /// Receipt adds the full quantity
    #[test]
    fn test_receipt_adds() {
        assert_eq!(apply_stock_delta(Decimal::ZERO, dec("50")), dec("50"));
    }

    /// Example scenario: stock 10, recipe consumes 12 -> stock 0, Stok Rendah
    #[test]
    fn test_scenario_clamped_completion() {
        let stock = apply_stock_delta(dec("10"), dec("-12"));
        assert_eq!(stock, Decimal::ZERO);
        assert_eq!(
            derive_material_status(stock, dec("5")),
            MaterialStatus::StokRendah
        );
    }

    /// Adjusting one material never changes another
    #[test]
    fn test_cross_material_isolation() {
        let mut ledger = vec![("MAT-FLOUR", dec("10")), ("MAT-MILK", dec("4"))];

        // Deduct only from the first material
        for entry in ledger.iter_mut() {
            if entry.0 == "MAT-FLOUR" {
                entry.1 = apply_stock_delta(entry.1, dec("-3"));
            }
        }

        assert_eq!(ledger[0].1, dec("7"));
        assert_eq!(ledger[1].1, dec("4"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for non-negative stock levels (0.0 to 1000.0)
    fn stock_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for signed deltas (-500.0 to 500.0)
    fn delta_strategy() -> impl Strategy<Value = Decimal> {
        (-5000i64..=5000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock is never negative after any adjustment
        #[test]
        fn prop_stock_never_negative(
            stock in stock_strategy(),
            delta in delta_strategy()
        ) {
            let result = apply_stock_delta(stock, delta);
            prop_assert!(result >= Decimal::ZERO);
        }

        /// A sufficient adjustment is exact arithmetic
        #[test]
        fn prop_sufficient_adjustment_exact(
            stock in stock_strategy(),
            delta in delta_strategy()
        ) {
            if stock + delta >= Decimal::ZERO {
                prop_assert_eq!(apply_stock_delta(stock, delta), stock + delta);
            }
        }

        /// An insufficient deduction yields exactly zero, not an error
        #[test]
        fn prop_over_deduction_yields_zero(
            stock in stock_strategy(),
            extra in (1i64..=5000i64).prop_map(|n| Decimal::new(n, 1))
        ) {
            let delta = -(stock + extra);
            prop_assert_eq!(apply_stock_delta(stock, delta), Decimal::ZERO);
        }

        /// Any sequence of adjustments keeps stock non-negative
        #[test]
        fn prop_adjustment_sequences_stay_non_negative(
            start in stock_strategy(),
            deltas in prop::collection::vec(delta_strategy(), 1..20)
        ) {
            let mut stock = start;
            for delta in deltas {
                stock = apply_stock_delta(stock, delta);
                prop_assert!(stock >= Decimal::ZERO);
            }
        }

        /// The derived status agrees with the threshold comparison
        #[test]
        fn prop_status_matches_threshold(
            stock in stock_strategy(),
            minimum in stock_strategy()
        ) {
            let status = derive_material_status(stock, minimum);
            if stock >= minimum {
                prop_assert_eq!(status, MaterialStatus::Aman);
            } else {
                prop_assert_eq!(status, MaterialStatus::StokRendah);
            }
        }
    }
}
