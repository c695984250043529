//! Fulfillment order tests
//!
//! Covers the waiting -> processing -> ready -> completed lifecycle and the
//! exactly-once material deduction on completion.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::{apply_stock_delta, deducts_stock, FulfillmentStatus};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// An in-memory order plus material ledger for simulating the completion
/// side effect the way the service applies it
struct OrderSim {
    status: FulfillmentStatus,
    /// (produk_id, jumlah) order lines
    items: Vec<(Uuid, i32)>,
    /// (produk_id, bahan_id, jumlah per unit) recipe lines
    recipe: Vec<(Uuid, Uuid, Decimal)>,
    /// (bahan_id, stok) ledger
    ledger: Vec<(Uuid, Decimal)>,
}

impl OrderSim {
    /// Advance the order, deducting stock only on the first completion
    fn advance(&mut self, target: FulfillmentStatus) {
        if deducts_stock(self.status, target) {
            for (produk_id, jumlah) in &self.items {
                for (recipe_produk, bahan_id, per_unit) in &self.recipe {
                    if recipe_produk == produk_id {
                        let delta = -(per_unit * Decimal::from(*jumlah));
                        if let Some(entry) =
                            self.ledger.iter_mut().find(|(id, _)| id == bahan_id)
                        {
                            entry.1 = apply_stock_delta(entry.1, delta);
                        }
                    }
                }
            }
        }
        // The requested status is written unconditionally
        self.status = target;
    }

    fn stock_of(&self, bahan_id: Uuid) -> Decimal {
        self.ledger
            .iter()
            .find(|(id, _)| *id == bahan_id)
            .map(|(_, stok)| *stok)
            .unwrap()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;
    use FulfillmentStatus::*;

    fn one_product_order(stock: Decimal, per_unit: Decimal, jumlah: i32) -> (OrderSim, Uuid) {
        let produk = Uuid::new_v4();
        let bahan = Uuid::new_v4();
        let sim = OrderSim {
            status: Waiting,
            items: vec![(produk, jumlah)],
            recipe: vec![(produk, bahan, per_unit)],
            ledger: vec![(bahan, stock)],
        };
        (sim, bahan)
    }

    /// Completing an order deducts recipe quantity times order quantity
    #[test]
    fn test_completion_deducts_stock() {
        let (mut sim, bahan) = one_product_order(dec("10"), dec("0.2"), 3);

        sim.advance(Processing);
        sim.advance(Ready);
        assert_eq!(sim.stock_of(bahan), dec("10"));

        sim.advance(Completed);
        assert_eq!(sim.stock_of(bahan), dec("9.4"));
    }

    /// Example scenario: stock 10, one unit consuming 12 -> clamped to 0
    #[test]
    fn test_completion_clamps_at_zero() {
        let (mut sim, bahan) = one_product_order(dec("10"), dec("12"), 1);

        sim.advance(Completed);
        assert_eq!(sim.stock_of(bahan), Decimal::ZERO);
    }

    /// Example scenario: completing twice deducts exactly once
    #[test]
    fn test_repeated_completion_is_idempotent() {
        let (mut sim, bahan) = one_product_order(dec("10"), dec("12"), 1);

        sim.advance(Completed);
        assert_eq!(sim.stock_of(bahan), Decimal::ZERO);

        sim.advance(Completed);
        assert_eq!(sim.stock_of(bahan), Decimal::ZERO);
    }

    /// The fast path waiting -> completed deducts like the full sequence
    #[test]
    fn test_fast_path_completion_deducts() {
        let (mut sim, bahan) = one_product_order(dec("5"), dec("1"), 2);

        sim.advance(Completed);
        assert_eq!(sim.stock_of(bahan), dec("3"));
    }

    /// Non-terminal transitions never touch stock
    #[test]
    fn test_non_terminal_transitions_leave_stock() {
        let (mut sim, bahan) = one_product_order(dec("5"), dec("1"), 2);

        sim.advance(Processing);
        sim.advance(Ready);
        assert_eq!(sim.stock_of(bahan), dec("5"));
    }

    /// A product without recipe lines consumes nothing on completion
    #[test]
    fn test_empty_recipe_consumes_nothing() {
        let produk = Uuid::new_v4();
        let bahan = Uuid::new_v4();
        let mut sim = OrderSim {
            status: Waiting,
            items: vec![(produk, 4)],
            recipe: vec![],
            ledger: vec![(bahan, dec("7"))],
        };

        sim.advance(Completed);
        assert_eq!(sim.stock_of(bahan), dec("7"));
    }

    /// An order with two products sharing a material sums their consumption
    #[test]
    fn test_shared_material_consumption_sums() {
        let kopi = Uuid::new_v4();
        let latte = Uuid::new_v4();
        let susu = Uuid::new_v4();
        let mut sim = OrderSim {
            status: Waiting,
            items: vec![(kopi, 1), (latte, 2)],
            recipe: vec![(kopi, susu, dec("0.05")), (latte, susu, dec("0.2"))],
            ledger: vec![(susu, dec("1"))],
        };

        sim.advance(Completed);
        // 1 * 0.05 + 2 * 0.2 = 0.45 consumed
        assert_eq!(sim.stock_of(susu), dec("0.55"));
    }

    /// Unknown status strings are not part of the lifecycle
    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(FulfillmentStatus::from_str("cancelled"), None);
        assert_eq!(FulfillmentStatus::from_str("Completed"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = FulfillmentStatus> {
        prop_oneof![
            Just(FulfillmentStatus::Waiting),
            Just(FulfillmentStatus::Processing),
            Just(FulfillmentStatus::Ready),
            Just(FulfillmentStatus::Completed),
        ]
    }

    fn stock_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    fn per_unit_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=500i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The deduction guard fires only for a first arrival into completed
        #[test]
        fn prop_deduction_guard(
            current in status_strategy(),
            target in status_strategy()
        ) {
            let fires = deducts_stock(current, target);
            let expected = target == FulfillmentStatus::Completed
                && current != FulfillmentStatus::Completed;
            prop_assert_eq!(fires, expected);
        }

        /// Completing twice leaves stock identical to completing once
        #[test]
        fn prop_double_completion_equals_single(
            stock in stock_strategy(),
            per_unit in per_unit_strategy(),
            jumlah in 1i32..=10
        ) {
            let produk = Uuid::new_v4();
            let bahan = Uuid::new_v4();
            let build = || OrderSim {
                status: FulfillmentStatus::Waiting,
                items: vec![(produk, jumlah)],
                recipe: vec![(produk, bahan, per_unit)],
                ledger: vec![(bahan, stock)],
            };

            let mut once = build();
            once.advance(FulfillmentStatus::Completed);

            let mut twice = build();
            twice.advance(FulfillmentStatus::Completed);
            twice.advance(FulfillmentStatus::Completed);

            prop_assert_eq!(once.stock_of(bahan), twice.stock_of(bahan));
        }

        /// Stock after completion is never negative
        #[test]
        fn prop_completion_never_negative(
            stock in stock_strategy(),
            per_unit in per_unit_strategy(),
            jumlah in 1i32..=10
        ) {
            let produk = Uuid::new_v4();
            let bahan = Uuid::new_v4();
            let mut sim = OrderSim {
                status: FulfillmentStatus::Waiting,
                items: vec![(produk, jumlah)],
                recipe: vec![(produk, bahan, per_unit)],
                ledger: vec![(bahan, stock)],
            };

            sim.advance(FulfillmentStatus::Completed);
            prop_assert!(sim.stock_of(bahan) >= Decimal::ZERO);
        }

        /// Completing an order never changes unrelated materials
        #[test]
        fn prop_unrelated_material_untouched(
            stock_a in stock_strategy(),
            stock_b in stock_strategy(),
            per_unit in per_unit_strategy()
        ) {
            let produk = Uuid::new_v4();
            let bahan_a = Uuid::new_v4();
            let bahan_b = Uuid::new_v4();
            let mut sim = OrderSim {
                status: FulfillmentStatus::Waiting,
                items: vec![(produk, 1)],
                recipe: vec![(produk, bahan_a, per_unit)],
                ledger: vec![(bahan_a, stock_a), (bahan_b, stock_b)],
            };

            sim.advance(FulfillmentStatus::Completed);
            prop_assert_eq!(sim.stock_of(bahan_b), stock_b);
        }
    }
}
