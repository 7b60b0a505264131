//! SQLite backed stores and a convenience function for building an [AppState] on them.

mod goal;
mod transaction;

pub use goal::SQLiteGoalStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize, pagination::PaginationConfig};

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Connection,
    local_timezone: &str,
    pagination_config: PaginationConfig,
) -> Result<AppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        Arc::new(SQLiteTransactionStore::new(connection.clone())),
        Arc::new(SQLiteGoalStore::new(connection)),
        local_timezone,
        pagination_config,
    ))
}

fn lock_connection(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// Build the `LIMIT ... OFFSET ...` clause for a paged query.
///
/// SQLite only accepts an offset after a limit, so a negative limit (no limit)
/// is used when only an offset is given. SQLite integers are signed 64-bit, so
/// larger values are clamped to `i64::MAX`.
fn limit_clause(limit: Option<u64>, offset: u64) -> Option<String> {
    let limit = limit.map(clamp_to_sql_integer);
    let offset = clamp_to_sql_integer(offset);

    match (limit, offset) {
        (Some(limit), offset) => Some(format!("LIMIT {limit} OFFSET {offset}")),
        (None, 0) => None,
        (None, offset) => Some(format!("LIMIT -1 OFFSET {offset}")),
    }
}

fn clamp_to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
