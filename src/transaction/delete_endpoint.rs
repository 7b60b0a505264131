use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{database_id::TransactionId, extract::AppPath, transaction::TransactionState};

/// A route handler for deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    AppPath(transaction_id): AppPath<TransactionId>,
) -> Response {
    match state.transaction_store.delete(transaction_id) {
        Ok(()) => {
            tracing::debug!("Deleted transaction {transaction_id}");
            Json(json!({ "message": format!("Transaction {transaction_id} deleted") }))
                .into_response()
        }
        Err(error) => error.into_response(),
    }
}
