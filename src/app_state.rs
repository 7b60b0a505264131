//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{
    pagination::PaginationConfig,
    stores::{GoalStore, TransactionStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store for transactions.
    pub transaction_store: Arc<dyn TransactionStore>,

    /// The store for savings goals.
    pub goal_store: Arc<dyn GoalStore>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to timestamp records when the client does not give a date.
    pub local_timezone: String,

    /// The config that controls how many records list endpoints return.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] from the stores for the domain models.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(
        transaction_store: Arc<dyn TransactionStore>,
        goal_store: Arc<dyn GoalStore>,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            transaction_store,
            goal_store,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}
