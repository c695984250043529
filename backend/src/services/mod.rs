//! Business logic services for the Cafe Merah Putih POS backend

pub mod fulfillment;
pub mod material;
pub mod procurement;
pub mod product;
pub mod recipe;
pub mod transaction;

pub use fulfillment::FulfillmentService;
pub use material::MaterialService;
pub use procurement::ProcurementService;
pub use product::ProductService;
pub use recipe::RecipeService;
pub use transaction::TransactionService;
