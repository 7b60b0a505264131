//! Database ID type definitions.

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Database identifier for a savings goal.
pub type GoalId = i64;
