//! Route handlers for fetching a single transaction or a page of transactions.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    database_id::TransactionId,
    extract::{AppPath, AppQuery},
    stores::TransactionQuery,
    transaction::{Category, TransactionState, TransactionType},
};

/// The query parameters for listing transactions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Only list transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only list transactions in this category.
    pub category: Option<Category>,
    /// The number of matching transactions to skip.
    #[serde(default)]
    pub offset: u64,
    /// The maximum number of transactions to return.
    pub limit: Option<u64>,
}

/// A route handler for getting a transaction by its database ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    AppPath(transaction_id): AppPath<TransactionId>,
) -> Response {
    match state.transaction_store.get(transaction_id) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for listing transactions oldest first.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Response {
    let query = TransactionQuery {
        transaction_type: params.transaction_type,
        category: params.category,
        offset: params.offset,
        limit: Some(state.pagination_config.resolve_limit(params.limit)),
    };

    match state.transaction_store.list(&query) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            error.into_response()
        }
    }
}
