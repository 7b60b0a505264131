//! Defines the transaction store trait.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Category, Transaction, TransactionBuilder, TransactionType, TransactionUpdate},
};

/// Handles the creation, retrieval, modification and deletion of transactions.
///
/// Every operation that takes an ID returns [Error::NotFound] if no
/// transaction has that ID.
pub trait TransactionStore: Send + Sync {
    /// Store a new transaction and return it with its assigned ID.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Change the fields of a transaction set in `update` and return the result.
    fn update(&self, id: TransactionId, update: TransactionUpdate) -> Result<Transaction, Error>;

    /// Remove a transaction from the store.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    ///
    /// Transactions are ordered by date and then ID.
    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::list].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions in this category.
    pub category: Option<Category>,
    /// Skip this many matching transactions.
    #[serde(default)]
    pub offset: u64,
    /// Return at most this many transactions. `None` returns every match.
    pub limit: Option<u64>,
}

impl TransactionQuery {
    /// Whether `transaction` passes the type and category filters.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.transaction_type
            .is_none_or(|transaction_type| transaction.transaction_type == transaction_type)
            && self
                .category
                .is_none_or(|category| transaction.category == category)
    }
}
