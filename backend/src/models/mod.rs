//! Database models for the Cafe Merah Putih POS backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
