//! In-memory stores.
//!
//! Useful for tests and for running the API without a database file. Records
//! are lost when the store is dropped.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    Error,
    database_id::{GoalId, TransactionId},
    goal::{Goal, NewGoal},
    stores::{GoalQuery, GoalStore, TransactionQuery, TransactionStore},
    transaction::{Transaction, TransactionBuilder, TransactionUpdate},
};

#[derive(Debug)]
struct Records<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Records<T> {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock<T>(records: &Mutex<Records<T>>) -> Result<MutexGuard<'_, Records<T>>, Error> {
    records.lock().map_err(|error| {
        tracing::error!("could not acquire store lock: {error}");
        Error::DatabaseLockError
    })
}

fn page<T>(items: impl Iterator<Item = T>, offset: u64, limit: Option<u64>) -> Vec<T> {
    let items = items.skip(usize::try_from(offset).unwrap_or(usize::MAX));

    match limit {
        Some(limit) => items
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect(),
        None => items.collect(),
    }
}

/// Stores transactions in memory.
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    records: Mutex<Records<Transaction>>,
}

impl MemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let mut records = lock(&self.records)?;

        let transaction = builder.finalize(records.next_id());
        records.rows.insert(transaction.id, transaction.clone());

        Ok(transaction)
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        lock(&self.records)?
            .rows
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn update(&self, id: TransactionId, update: TransactionUpdate) -> Result<Transaction, Error> {
        let mut records = lock(&self.records)?;

        let row = records.rows.get_mut(&id).ok_or(Error::NotFound)?;
        let updated = row.clone().apply_update(update)?;
        *row = updated.clone();

        Ok(updated)
    }

    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        lock(&self.records)?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound)
    }

    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let records = lock(&self.records)?;

        let mut matches: Vec<&Transaction> = records
            .rows
            .values()
            .filter(|transaction| query.matches(transaction))
            .collect();
        matches.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        Ok(page(matches.into_iter().cloned(), query.offset, query.limit))
    }
}

/// Stores goals in memory.
#[derive(Debug, Default)]
pub struct MemoryGoalStore {
    records: Mutex<Records<Goal>>,
}

impl MemoryGoalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GoalStore for MemoryGoalStore {
    fn create(&self, new_goal: NewGoal) -> Result<Goal, Error> {
        let mut records = lock(&self.records)?;

        let goal = new_goal.finalize(records.next_id());
        records.rows.insert(goal.id, goal.clone());

        Ok(goal)
    }

    fn get(&self, id: GoalId) -> Result<Goal, Error> {
        lock(&self.records)?
            .rows
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn update_with(
        &self,
        id: GoalId,
        modify: &dyn Fn(Goal) -> Result<Goal, Error>,
    ) -> Result<Goal, Error> {
        let mut records = lock(&self.records)?;

        let row = records.rows.get_mut(&id).ok_or(Error::NotFound)?;
        let goal = modify(row.clone())?;
        *row = goal.clone();

        Ok(goal)
    }

    fn delete(&self, id: GoalId) -> Result<(), Error> {
        lock(&self.records)?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound)
    }

    fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, Error> {
        let records = lock(&self.records)?;

        let matches = records
            .rows
            .values()
            .filter(|goal| query.status.is_none_or(|status| goal.status == status))
            .cloned();

        Ok(page(matches, query.offset, query.limit))
    }
}
