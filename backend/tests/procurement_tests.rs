//! Procurement order tests
//!
//! Covers the Pending -> Dikirim -> Diterima lifecycle and the exactly-once
//! stock increment on receipt.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{apply_stock_delta, receives_stock, ProcurementStatus};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// An in-memory procurement order plus material stock for simulating the
/// receipt side effect the way the service applies it
struct ProcurementSim {
    status: ProcurementStatus,
    jumlah: Decimal,
    stock: Decimal,
    tanggal_terima: Option<NaiveDate>,
}

impl ProcurementSim {
    fn update_status(&mut self, target: ProcurementStatus, received: NaiveDate) {
        if receives_stock(self.status, target) {
            self.stock = apply_stock_delta(self.stock, self.jumlah);
            // Only the first receipt sets the received date
            self.tanggal_terima = Some(received);
        }
        self.status = target;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;
    use ProcurementStatus::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    /// Example scenario: quantity 50 against empty stock, received once
    #[test]
    fn test_receipt_increments_stock() {
        let mut sim = ProcurementSim {
            status: Pending,
            jumlah: dec("50"),
            stock: Decimal::ZERO,
            tanggal_terima: None,
        };

        sim.update_status(Dikirim, day(1));
        assert_eq!(sim.stock, Decimal::ZERO);
        assert_eq!(sim.tanggal_terima, None);

        sim.update_status(Diterima, day(2));
        assert_eq!(sim.stock, dec("50"));
        assert_eq!(sim.tanggal_terima, Some(day(2)));
    }

    /// Example scenario: re-marking a received order changes nothing
    #[test]
    fn test_repeated_receipt_is_idempotent() {
        let mut sim = ProcurementSim {
            status: Pending,
            jumlah: dec("50"),
            stock: Decimal::ZERO,
            tanggal_terima: None,
        };

        sim.update_status(Diterima, day(2));
        assert_eq!(sim.stock, dec("50"));

        sim.update_status(Diterima, day(9));
        assert_eq!(sim.stock, dec("50"));
        // The received date keeps its first value
        assert_eq!(sim.tanggal_terima, Some(day(2)));
    }

    /// Receipt straight from Pending skips Dikirim but still increments once
    #[test]
    fn test_direct_receipt_from_pending() {
        let mut sim = ProcurementSim {
            status: Pending,
            jumlah: dec("12.5"),
            stock: dec("3"),
            tanggal_terima: None,
        };

        sim.update_status(Diterima, day(4));
        assert_eq!(sim.stock, dec("15.5"));
    }

    /// Shipping alone never touches stock
    #[test]
    fn test_shipping_does_not_increment() {
        let mut sim = ProcurementSim {
            status: Pending,
            jumlah: dec("20"),
            stock: dec("5"),
            tanggal_terima: None,
        };

        sim.update_status(Dikirim, day(1));
        assert_eq!(sim.stock, dec("5"));
    }

    /// Status values are the exact Indonesian vocabulary
    #[test]
    fn test_status_labels() {
        assert_eq!(ProcurementStatus::Pending.as_str(), "Pending");
        assert_eq!(ProcurementStatus::Dikirim.as_str(), "Dikirim");
        assert_eq!(ProcurementStatus::Diterima.as_str(), "Diterima");
        assert_eq!(ProcurementStatus::from_str("Selesai"), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = ProcurementStatus> {
        prop_oneof![
            Just(ProcurementStatus::Pending),
            Just(ProcurementStatus::Dikirim),
            Just(ProcurementStatus::Diterima),
        ]
    }

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The receipt guard fires only for a first arrival into Diterima
        #[test]
        fn prop_receipt_guard(
            current in status_strategy(),
            target in status_strategy()
        ) {
            let fires = receives_stock(current, target);
            let expected = target == ProcurementStatus::Diterima
                && current != ProcurementStatus::Diterima;
            prop_assert_eq!(fires, expected);
        }

        /// Marking received twice leaves stock identical to marking once
        #[test]
        fn prop_double_receipt_equals_single(
            stock in quantity_strategy(),
            jumlah in quantity_strategy()
        ) {
            let received = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
            let build = || ProcurementSim {
                status: ProcurementStatus::Pending,
                jumlah,
                stock,
                tanggal_terima: None,
            };

            let mut once = build();
            once.update_status(ProcurementStatus::Diterima, received);

            let mut twice = build();
            twice.update_status(ProcurementStatus::Diterima, received);
            twice.update_status(ProcurementStatus::Diterima, received);

            prop_assert_eq!(once.stock, twice.stock);
        }

        /// A full lifecycle increments exactly once by the ordered quantity
        #[test]
        fn prop_full_lifecycle_increments_once(
            stock in quantity_strategy(),
            jumlah in quantity_strategy()
        ) {
            let received = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
            let mut sim = ProcurementSim {
                status: ProcurementStatus::Pending,
                jumlah,
                stock,
                tanggal_terima: None,
            };

            sim.update_status(ProcurementStatus::Dikirim, received);
            sim.update_status(ProcurementStatus::Diterima, received);

            prop_assert_eq!(sim.stock, stock + jumlah);
        }
    }
}
