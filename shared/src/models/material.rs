//! Raw material (bahan baku) models and stock arithmetic

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw material tracked by the ledger
///
/// `status` is always derived from `stok_saat_ini` and `stok_minimum` at
/// read time; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub bahan_id: Uuid,
    pub nama_bahan: String,
    pub stok_saat_ini: Decimal,
    pub stok_minimum: Decimal,
    pub satuan: MaterialUnit,
    pub status: MaterialStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Units of measure for raw materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialUnit {
    Kg,
    Liter,
    Pcs,
    Gram,
    Ml,
}

impl MaterialUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialUnit::Kg => "kg",
            MaterialUnit::Liter => "liter",
            MaterialUnit::Pcs => "pcs",
            MaterialUnit::Gram => "gram",
            MaterialUnit::Ml => "ml",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "kg" => Some(MaterialUnit::Kg),
            "liter" => Some(MaterialUnit::Liter),
            "pcs" => Some(MaterialUnit::Pcs),
            "gram" => Some(MaterialUnit::Gram),
            "ml" => Some(MaterialUnit::Ml),
            _ => None,
        }
    }
}

/// Derived stock status of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialStatus {
    #[serde(rename = "Aman")]
    Aman,
    #[serde(rename = "Stok Rendah")]
    StokRendah,
}

impl MaterialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialStatus::Aman => "Aman",
            MaterialStatus::StokRendah => "Stok Rendah",
        }
    }
}

/// Derive the stock status from current and minimum stock
pub fn derive_material_status(stok_saat_ini: Decimal, stok_minimum: Decimal) -> MaterialStatus {
    if stok_saat_ini >= stok_minimum {
        MaterialStatus::Aman
    } else {
        MaterialStatus::StokRendah
    }
}

/// Apply a stock delta, clamping the result at zero
///
/// The delta may be negative (consumption) or positive (receipt). Stock is
/// never allowed to go negative; an over-deduction is recorded as zero.
pub fn apply_stock_delta(stok: Decimal, delta: Decimal) -> Decimal {
    (stok + delta).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn status_is_aman_when_stock_meets_minimum() {
        assert_eq!(
            derive_material_status(dec("5"), dec("5")),
            MaterialStatus::Aman
        );
        assert_eq!(
            derive_material_status(dec("10"), dec("5")),
            MaterialStatus::Aman
        );
    }

    #[test]
    fn status_is_stok_rendah_below_minimum() {
        assert_eq!(
            derive_material_status(dec("4.9"), dec("5")),
            MaterialStatus::StokRendah
        );
        assert_eq!(
            derive_material_status(Decimal::ZERO, dec("0.1")),
            MaterialStatus::StokRendah
        );
    }

    #[test]
    fn delta_clamps_at_zero() {
        assert_eq!(apply_stock_delta(dec("10"), dec("-12")), Decimal::ZERO);
        assert_eq!(apply_stock_delta(dec("10"), dec("-10")), Decimal::ZERO);
    }

    #[test]
    fn delta_applies_normally_when_sufficient() {
        assert_eq!(apply_stock_delta(dec("10"), dec("-2.5")), dec("7.5"));
        assert_eq!(apply_stock_delta(Decimal::ZERO, dec("50")), dec("50"));
    }

    #[test]
    fn unit_round_trips_through_str() {
        for unit in [
            MaterialUnit::Kg,
            MaterialUnit::Liter,
            MaterialUnit::Pcs,
            MaterialUnit::Gram,
            MaterialUnit::Ml,
        ] {
            assert_eq!(MaterialUnit::from_str(unit.as_str()), Some(unit));
        }
        assert_eq!(MaterialUnit::from_str("ton"), None);
    }
}
