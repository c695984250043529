//! Route definitions for the Cafe Merah Putih POS backend

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - material ledger
        .nest("/materials", material_routes())
        // Protected routes - product catalog and recipes
        .nest("/products", product_routes())
        // Protected routes - sales transactions
        .nest("/transactions", transaction_routes())
        // Protected routes - barista fulfillment orders
        .nest("/fulfillment-orders", fulfillment_routes())
        // Protected routes - material procurement
        .nest("/procurement-orders", procurement_routes())
}

/// Material ledger routes (protected)
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route("/low-stock", get(handlers::list_low_stock))
        .route(
            "/:bahan_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
        .route("/:bahan_id/adjust", post(handlers::adjust_material_stock))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog and recipe routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        .route("/:produk_id", get(handlers::get_product))
        .route(
            "/:produk_id/materials",
            get(handlers::get_product_materials).post(handlers::add_product_material),
        )
        .route(
            "/:produk_id/materials/:bahan_id",
            put(handlers::update_product_material).delete(handlers::remove_product_material),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sales transaction routes (protected)
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/:transaksi_id", get(handlers::get_transaction))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Barista fulfillment order routes (protected)
fn fulfillment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_fulfillment_orders).post(handlers::create_fulfillment_order),
        )
        .route(
            "/:order_id",
            get(handlers::get_fulfillment_order)
                .patch(handlers::advance_fulfillment_order)
                .delete(handlers::delete_fulfillment_order),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Procurement order routes (protected)
fn procurement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_procurement_orders).post(handlers::create_procurement_order),
        )
        .route(
            "/:pengadaan_id",
            get(handlers::get_procurement_order).patch(handlers::update_procurement_order),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
