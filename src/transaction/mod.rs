//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The table schema used by the SQLite store
//! - Route handlers for creating, querying, editing, deleting and summarising transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod query;
mod summary;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, pagination::PaginationConfig, stores::TransactionStore};

pub use self::core::{
    Category, Transaction, TransactionBuilder, TransactionType, TransactionUpdate,
    create_transaction_table, map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use query::{get_transaction_endpoint, list_transactions_endpoint};
pub use summary::{get_balance_summary_endpoint, get_category_summary_endpoint};

/// The state needed by the transaction route handlers.
#[derive(Clone)]
pub struct TransactionState {
    /// The store for managing transactions.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The canonical timezone used to date transactions created without a date.
    pub local_timezone: String,
    /// Limits for listing transactions.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
