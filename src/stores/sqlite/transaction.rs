//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, params_from_iter, types::Value};
use time::UtcOffset;

use crate::{
    Error,
    database_id::TransactionId,
    stores::{TransactionQuery, TransactionStore},
    transaction::{Transaction, TransactionBuilder, TransactionUpdate, map_transaction_row},
};

use super::{limit_clause, lock_connection};

const SELECT_TRANSACTION: &str =
    "SELECT id, description, amount, type, category, date FROM \"transaction\"";

/// Stores transactions in a SQLite database.
///
/// Dates are stored in UTC so that ordering by the date column follows the
/// order of the instants, whatever offset they were given with.
///
/// The transaction table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = lock_connection(&self.connection)?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (description, amount, type, category, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, description, amount, type, category, date",
            )?
            .query_row(
                (
                    builder.description,
                    builder.amount.to_string(),
                    builder.transaction_type,
                    builder.category,
                    builder.date.to_offset(UtcOffset::UTC),
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = lock_connection(&self.connection)?;

        get_transaction(id, &connection)
    }

    /// Update a transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - [Error::NegativeAmount] if the new amount is negative,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(&self, id: TransactionId, update: TransactionUpdate) -> Result<Transaction, Error> {
        let connection = lock_connection(&self.connection)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let mut updated = get_transaction(id, &sql_transaction)?.apply_update(update)?;
        updated.date = updated.date.to_offset(UtcOffset::UTC);

        sql_transaction.execute(
            "UPDATE \"transaction\"
             SET description = ?1, amount = ?2, type = ?3, category = ?4, date = ?5
             WHERE id = ?6",
            (
                &updated.description,
                updated.amount.to_string(),
                updated.transaction_type,
                updated.category,
                updated.date,
                id,
            ),
        )?;

        sql_transaction.commit()?;

        Ok(updated)
    }

    /// Delete a transaction from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let connection = lock_connection(&self.connection)?;

        let rows_affected =
            connection.execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![SELECT_TRANSACTION.to_owned()];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(transaction_type) = query.transaction_type {
            where_clause_parts.push(format!("type = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(transaction_type.as_str().to_owned()));
        }

        if let Some(category) = query.category {
            where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(category.as_str().to_owned()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        // Sort by date, and then ID to keep transaction order stable after updates
        query_string_parts.push("ORDER BY date ASC, id ASC".to_owned());

        if let Some(clause) = limit_clause(query.limit, query.offset) {
            query_string_parts.push(clause);
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        let connection = lock_connection(&self.connection)?;

        connection
            .prepare(&query_string)?
            .query_map(params, map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }
}
