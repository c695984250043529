//! Shared types and models for the Cafe Merah Putih POS backend
//!
//! This crate contains the domain models, status enums, and the pure
//! stock/pricing arithmetic shared between the backend services and tests.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
