//! Domain models for the Cafe Merah Putih POS backend

mod material;
mod order;
mod product;
mod transaction;
mod user;

pub use material::*;
pub use order::*;
pub use product::*;
pub use transaction::*;
pub use user::*;
