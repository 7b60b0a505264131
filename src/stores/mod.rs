//! Contains traits and implementations for objects that store transactions and goals.
//!
//! Route handlers only see the store traits, so the persistence backend can be
//! swapped, e.g. for the in-memory stores in tests.

mod goal;
mod transaction;

pub mod memory;
pub mod sqlite;

pub use goal::{GoalQuery, GoalStore};
pub use transaction::{TransactionQuery, TransactionStore};
