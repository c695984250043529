//! Identity vocabulary for the externally managed user store
//!
//! The POS core only reads users to attribute transactions and orders and
//! to reject requests from unknown or deactivated accounts.

use serde::{Deserialize, Serialize};

/// Staff roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "Kasir")]
    Kasir,
    #[serde(rename = "Barista")]
    Barista,
    #[serde(rename = "Manager")]
    Manager,
    #[serde(rename = "Pengadaan")]
    Pengadaan,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Kasir => "Kasir",
            UserRole::Barista => "Barista",
            UserRole::Manager => "Manager",
            UserRole::Pengadaan => "Pengadaan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Kasir" => Some(UserRole::Kasir),
            "Barista" => Some(UserRole::Barista),
            "Manager" => Some(UserRole::Manager),
            "Pengadaan" => Some(UserRole::Pengadaan),
            _ => None,
        }
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    #[serde(rename = "Aktif")]
    Aktif,
    #[serde(rename = "Nonaktif")]
    Nonaktif,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Aktif => "Aktif",
            UserStatus::Nonaktif => "Nonaktif",
        }
    }
}
