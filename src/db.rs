//! Database initialization and helpers shared by the SQLite stores.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;

use crate::{goal::create_goal_table, transaction::create_transaction_table};

/// Create the tables for the domain models, if they do not exist already.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;
    create_goal_table(&transaction)?;

    transaction.commit()
}

/// Read a decimal stored as TEXT from column `index` of `row`.
///
/// Amounts are stored as text so that SQLite never rounds them through a
/// floating point representation.
pub(crate) fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    Decimal::from_str(&raw)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}
