//! Implements a SQLite backed goal store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    database_id::GoalId,
    goal::{Goal, NewGoal, map_goal_row},
    stores::{GoalQuery, GoalStore},
};

use super::{limit_clause, lock_connection};

const SELECT_GOAL: &str = "SELECT id, title, description, target_amount, current_amount, \
    deadline, status, created_at FROM goal";

/// Stores goals in a SQLite database.
///
/// The goal table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGoalStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

fn get_goal(id: GoalId, connection: &Connection) -> Result<Goal, Error> {
    let goal = connection
        .prepare(&format!("{SELECT_GOAL} WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_goal_row)?;

    Ok(goal)
}

fn save_goal(goal: &Goal, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE goal
         SET title = ?1, description = ?2, target_amount = ?3, current_amount = ?4,
             deadline = ?5, status = ?6
         WHERE id = ?7",
        (
            &goal.title,
            &goal.description,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.deadline,
            goal.status,
            goal.id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

impl GoalStore for SQLiteGoalStore {
    /// Create a new goal in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn create(&self, new_goal: NewGoal) -> Result<Goal, Error> {
        let connection = lock_connection(&self.connection)?;

        connection.execute(
            "INSERT INTO goal (title, description, target_amount, current_amount, deadline, status, created_at)
             VALUES (?1, ?2, ?3, '0', ?4, 'active', ?5)",
            (
                &new_goal.title,
                &new_goal.description,
                new_goal.target_amount.to_string(),
                new_goal.deadline,
                new_goal.created_at,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(new_goal.finalize(id))
    }

    /// Retrieve a goal in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid goal,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: GoalId) -> Result<Goal, Error> {
        let connection = lock_connection(&self.connection)?;

        get_goal(id, &connection)
    }

    /// Read, modify and write a goal inside a single SQL transaction while
    /// holding the connection lock.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid goal,
    /// - any error returned by `modify`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update_with(
        &self,
        id: GoalId,
        modify: &dyn Fn(Goal) -> Result<Goal, Error>,
    ) -> Result<Goal, Error> {
        let connection = lock_connection(&self.connection)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let goal = modify(get_goal(id, &sql_transaction)?)?;
        save_goal(&goal, &sql_transaction)?;

        sql_transaction.commit()?;

        Ok(goal)
    }

    /// Delete a goal from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid goal,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete(&self, id: GoalId) -> Result<(), Error> {
        let connection = lock_connection(&self.connection)?;

        let rows_affected = connection.execute("DELETE FROM goal WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Query for goals in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, Error> {
        let mut query_string_parts = vec![SELECT_GOAL.to_owned()];
        let mut query_parameters = vec![];

        if let Some(status) = query.status {
            query_string_parts.push("WHERE status = ?1".to_owned());
            query_parameters.push(Value::Text(status.as_str().to_owned()));
        }

        query_string_parts.push("ORDER BY id ASC".to_owned());

        if let Some(clause) = limit_clause(query.limit, query.offset) {
            query_string_parts.push(clause);
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        let connection = lock_connection(&self.connection)?;

        connection
            .prepare(&query_string)?
            .query_map(params, map_goal_row)?
            .map(|maybe_goal| maybe_goal.map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        thread,
    };

    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        goal::{GoalStatus, GoalUpdate, NewGoal, apply_progress},
        stores::{GoalQuery, GoalStore},
    };

    use super::SQLiteGoalStore;

    fn get_test_store() -> SQLiteGoalStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteGoalStore::new(Arc::new(Mutex::new(conn)))
    }

    fn new_goal(title: &str) -> NewGoal {
        NewGoal::new(title, dec!(100), datetime!(2025-10-05 12:00 UTC)).unwrap()
    }

    #[test]
    fn create_and_get() {
        let store = get_test_store();

        let goal = store
            .create(
                new_goal("Laptop")
                    .description(Some("For work".to_owned()))
                    .deadline(Some(datetime!(2026-01-01 00:00 UTC))),
            )
            .unwrap();

        assert_eq!(goal.id, 1);
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(store.get(goal.id), Ok(goal));
    }

    #[test]
    fn get_fails_on_missing_id() {
        let store = get_test_store();

        assert_eq!(store.get(7), Err(Error::NotFound));
    }

    #[test]
    fn update_with_saves_result() {
        let store = get_test_store();
        let goal = store.create(new_goal("Laptop")).unwrap();

        let updated = store
            .update_with(goal.id, &|goal| apply_progress(goal, dec!(60)))
            .unwrap();

        assert_eq!(updated.current_amount, dec!(60));
        assert_eq!(store.get(goal.id), Ok(updated));
    }

    #[test]
    fn update_with_error_leaves_goal_unchanged() {
        let store = get_test_store();
        let goal = store.create(new_goal("Laptop")).unwrap();
        store
            .update_with(goal.id, &|goal| apply_progress(goal, dec!(100)))
            .unwrap();
        let completed = store.get(goal.id).unwrap();

        let result = store.update_with(goal.id, &|goal| apply_progress(goal, dec!(5)));

        assert_eq!(result, Err(Error::InvalidState(GoalStatus::Completed)));
        assert_eq!(store.get(goal.id), Ok(completed));
    }

    #[test]
    fn update_fails_on_missing_id() {
        let store = get_test_store();

        assert_eq!(
            store.update(3, GoalUpdate::default()),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn concurrent_progress_is_not_lost() {
        let store = Arc::new(get_test_store());
        let goal = store
            .create(NewGoal::new("Savings", dec!(1000), datetime!(2025-10-05 12:00 UTC)).unwrap())
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        store
                            .update_with(goal.id, &|goal| apply_progress(goal, dec!(1.25)))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(goal.id).unwrap().current_amount, dec!(100.00));
    }

    #[test]
    fn delete_removes_goal() {
        let store = get_test_store();
        let goal = store.create(new_goal("Laptop")).unwrap();

        store.delete(goal.id).unwrap();

        assert_eq!(store.get(goal.id), Err(Error::NotFound));
        assert_eq!(store.delete(goal.id), Err(Error::NotFound));
    }

    #[test]
    fn list_filters_by_status() {
        let store = get_test_store();
        let first = store.create(new_goal("First")).unwrap();
        let second = store.create(new_goal("Second")).unwrap();
        store
            .update(
                second.id,
                GoalUpdate {
                    status: Some(GoalStatus::Cancelled),
                    ..Default::default()
                },
            )
            .unwrap();

        let active = store
            .list(&GoalQuery {
                status: Some(GoalStatus::Active),
                ..Default::default()
            })
            .unwrap();
        let all = store.list(&GoalQuery::default()).unwrap();

        assert_eq!(active, vec![first]);
        assert_eq!(all.len(), 2);
    }
}
