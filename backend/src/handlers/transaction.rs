//! HTTP handlers for sales transaction endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::transaction::{CreateTransactionInput, TransactionService};
use crate::AppState;
use crate::models::Transaction;
use shared::types::ApiResponse;

/// List all transactions
pub async fn list_transactions(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Transaction>>>> {
    let service = TransactionService::new(state.db);
    let transactions = service.list_transactions().await?;
    Ok(Json(ApiResponse::ok(transactions)))
}

/// Get transaction by ID
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaksi_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Transaction>>> {
    let service = TransactionService::new(state.db);
    let transaction = service.get_transaction(transaksi_id).await?;
    Ok(Json(ApiResponse::ok(transaction)))
}

/// Record a sale for the authenticated cashier
pub async fn create_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateTransactionInput>,
) -> AppResult<Json<ApiResponse<Transaction>>> {
    let service = TransactionService::new(state.db);
    let transaction = service
        .create_transaction(current_user.0.user_id, input)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        transaction,
        "Transaksi berhasil dibuat",
    )))
}
