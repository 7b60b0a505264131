//! Route handlers for the aggregate views of transactions.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{compute_balance, compute_category_summary},
    extract::AppQuery,
    stores::TransactionQuery,
    transaction::{Category, TransactionState, TransactionType},
};

/// The filters that may be applied before summarising transactions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SummaryParams {
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions in this category.
    pub category: Option<Category>,
}

impl From<SummaryParams> for TransactionQuery {
    fn from(params: SummaryParams) -> Self {
        Self {
            transaction_type: params.transaction_type,
            category: params.category,
            ..Default::default()
        }
    }
}

/// A route handler for the total income, total expense and balance of all
/// matching transactions.
pub async fn get_balance_summary_endpoint(
    State(state): State<TransactionState>,
    AppQuery(params): AppQuery<SummaryParams>,
) -> Response {
    match state.transaction_store.list(&params.into()) {
        Ok(transactions) => Json(compute_balance(&transactions)).into_response(),
        Err(error) => {
            tracing::error!("Could not fetch transactions for the balance summary: {error}");
            error.into_response()
        }
    }
}

/// A route handler for the per-category totals of all matching transactions.
pub async fn get_category_summary_endpoint(
    State(state): State<TransactionState>,
    AppQuery(params): AppQuery<SummaryParams>,
) -> Response {
    match state.transaction_store.list(&params.into()) {
        Ok(transactions) => Json(compute_category_summary(&transactions)).into_response(),
        Err(error) => {
            tracing::error!("Could not fetch transactions for the category summary: {error}");
            error.into_response()
        }
    }
}
