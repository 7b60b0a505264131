//! Core goal domain types and table schema.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::GoalId, db::get_decimal};

/// Where a goal is in its lifecycle.
///
/// Goals start out active. An active goal becomes completed once its progress
/// reaches the target, or cancelled when the user gives up on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// The goal is accepting progress.
    #[default]
    Active,
    /// The goal reached its target amount.
    Completed,
    /// The goal was abandoned.
    Cancelled,
}

impl GoalStatus {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "cancelled" => Ok(GoalStatus::Cancelled),
            other => Err(format!("unknown goal status \"{other}\"")),
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for GoalStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for GoalStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

/// A savings target and the progress made towards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: GoalId,
    /// A short name for the goal, e.g. "Trip to Europe".
    pub title: String,
    /// Optional notes about the goal.
    pub description: Option<String>,
    /// The amount to save. Always greater than zero.
    pub target_amount: Decimal,
    /// The amount saved so far.
    pub current_amount: Decimal,
    /// When the goal should be reached by, if ever.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deadline: Option<OffsetDateTime>,
    /// Where the goal is in its lifecycle.
    pub status: GoalStatus,
    /// When the goal was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Goal {
    /// Whether the saved amount has reached the target.
    pub fn is_target_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Return a copy of this goal with the fields set in `update` replaced.
    ///
    /// Updates are administrative edits, so any field may change, including
    /// the status of a completed or cancelled goal. An active goal whose saved
    /// amount reaches its target after the edit is marked as completed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyGoalTitle] if the new title is empty,
    /// - [Error::NonPositiveTarget] if the new target is zero or less,
    /// - or [Error::NegativeAmount] if the new current amount is negative.
    pub fn apply_update(self, update: GoalUpdate) -> Result<Self, Error> {
        let title = match update.title {
            Some(title) => validate_title(&title)?,
            None => self.title,
        };
        let target_amount = match update.target_amount {
            Some(target_amount) => validate_target(target_amount)?,
            None => self.target_amount,
        };
        let current_amount = match update.current_amount {
            Some(current_amount) if current_amount < Decimal::ZERO => {
                return Err(Error::NegativeAmount(current_amount.to_string()));
            }
            Some(current_amount) => current_amount,
            None => self.current_amount,
        };

        let mut goal = Self {
            id: self.id,
            title,
            description: update.description.unwrap_or(self.description),
            target_amount,
            current_amount,
            deadline: update.deadline.unwrap_or(self.deadline),
            status: update.status.unwrap_or(self.status),
            created_at: self.created_at,
        };

        if goal.status == GoalStatus::Active && goal.is_target_reached() {
            goal.status = GoalStatus::Completed;
        }

        Ok(goal)
    }
}

fn validate_title(title: &str) -> Result<String, Error> {
    let title = title.trim();

    if title.is_empty() {
        Err(Error::EmptyGoalTitle)
    } else {
        Ok(title.to_owned())
    }
}

fn validate_target(target_amount: Decimal) -> Result<Decimal, Error> {
    if target_amount > Decimal::ZERO {
        Ok(target_amount)
    } else {
        Err(Error::NonPositiveTarget(target_amount.to_string()))
    }
}

/// A validated goal that has not been stored yet.
///
/// New goals are active and have no progress.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) target_amount: Decimal,
    pub(crate) deadline: Option<OffsetDateTime>,
    pub(crate) created_at: OffsetDateTime,
}

impl NewGoal {
    /// Create a new goal.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyGoalTitle] if `title` is empty or only whitespace,
    /// - or [Error::NonPositiveTarget] if `target_amount` is zero or less.
    pub fn new(
        title: &str,
        target_amount: Decimal,
        created_at: OffsetDateTime,
    ) -> Result<Self, Error> {
        Ok(Self {
            title: validate_title(title)?,
            description: None,
            target_amount: validate_target(target_amount)?,
            deadline: None,
            created_at,
        })
    }

    /// Set the description of the goal.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Set the deadline of the goal.
    pub fn deadline(mut self, deadline: Option<OffsetDateTime>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Attach `id` to produce the stored goal.
    pub(crate) fn finalize(self, id: GoalId) -> Goal {
        Goal {
            id,
            title: self.title,
            description: self.description,
            target_amount: self.target_amount,
            current_amount: Decimal::ZERO,
            deadline: self.deadline,
            status: GoalStatus::Active,
            created_at: self.created_at,
        }
    }
}

/// The fields of a goal to change. Fields set to `None` are left as is.
///
/// The optional fields, description and deadline, use a nested option:
/// `Some(None)` clears the field, which is how an explicit JSON `null` is read.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct GoalUpdate {
    /// The new title.
    pub title: Option<String>,
    /// The new description.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    /// The new target amount, must be greater than zero.
    pub target_amount: Option<Decimal>,
    /// The new saved amount, must not be negative.
    pub current_amount: Option<Decimal>,
    /// The new deadline.
    #[serde(default, deserialize_with = "deserialize_present_deadline")]
    pub deadline: Option<Option<OffsetDateTime>>,
    /// The new status.
    pub status: Option<GoalStatus>,
}

/// Wrap a field that is present in the input in `Some`, even when it is `null`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn deserialize_present_deadline<'de, D>(
    deserializer: D,
) -> Result<Option<Option<OffsetDateTime>>, D::Error>
where
    D: Deserializer<'de>,
{
    time::serde::rfc3339::option::deserialize(deserializer).map(Some)
}

/// Create the goal table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS goal (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            target_amount TEXT NOT NULL,
            current_amount TEXT NOT NULL,
            deadline TEXT,
            status TEXT NOT NULL CHECK (status IN ('active', 'completed', 'cancelled')),
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_goal_status ON goal(status);",
    )?;

    Ok(())
}

/// Map a database row to a Goal.
///
/// The row must contain the columns
/// `id, title, description, target_amount, current_amount, deadline, status, created_at` in order.
pub fn map_goal_row(row: &Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        target_amount: get_decimal(row, 3)?,
        current_amount: get_decimal(row, 4)?,
        deadline: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use crate::{
        Error,
        goal::{GoalStatus, GoalUpdate, NewGoal},
    };

    #[test]
    fn new_goal_starts_active_with_no_progress() {
        let goal = NewGoal::new("Trip to Europe", dec!(15000), datetime!(2025-10-05 12:00 UTC))
            .unwrap()
            .finalize(1);

        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.current_amount, Decimal::ZERO);
    }

    #[test]
    fn new_fails_on_empty_title() {
        let result = NewGoal::new(" \t\n", dec!(100), datetime!(2025-10-05 12:00 UTC));

        assert_eq!(result, Err(Error::EmptyGoalTitle));
    }

    #[test]
    fn new_fails_on_non_positive_target() {
        let result = NewGoal::new("Laptop", dec!(0), datetime!(2025-10-05 12:00 UTC));
        assert_eq!(result, Err(Error::NonPositiveTarget("0".to_owned())));

        let result = NewGoal::new("Laptop", dec!(-1), datetime!(2025-10-05 12:00 UTC));
        assert_eq!(result, Err(Error::NonPositiveTarget("-1".to_owned())));
    }

    #[test]
    fn update_that_reaches_target_completes_goal() {
        let goal = NewGoal::new("Laptop", dec!(3000), datetime!(2025-10-05 12:00 UTC))
            .unwrap()
            .finalize(1);

        let goal = goal
            .apply_update(GoalUpdate {
                current_amount: Some(dec!(3000)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[test]
    fn update_can_cancel_goal() {
        let goal = NewGoal::new("Laptop", dec!(3000), datetime!(2025-10-05 12:00 UTC))
            .unwrap()
            .finalize(1);

        let goal = goal
            .apply_update(GoalUpdate {
                status: Some(GoalStatus::Cancelled),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(goal.status, GoalStatus::Cancelled);
    }

    #[test]
    fn update_keeps_unset_fields() {
        let goal = NewGoal::new("Laptop", dec!(3000), datetime!(2025-10-05 12:00 UTC))
            .unwrap()
            .description(Some("For work".to_owned()))
            .finalize(1);

        let updated = goal
            .clone()
            .apply_update(GoalUpdate {
                title: Some("New laptop".to_owned()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.title, "New laptop");
        assert_eq!(updated.description, goal.description);
        assert_eq!(updated.target_amount, goal.target_amount);
        assert_eq!(updated.created_at, goal.created_at);
    }

    #[test]
    fn update_can_clear_optional_fields() {
        let goal = NewGoal::new("Laptop", dec!(3000), datetime!(2025-10-05 12:00 UTC))
            .unwrap()
            .description(Some("For work".to_owned()))
            .deadline(Some(datetime!(2026-01-01 00:00 UTC)))
            .finalize(1);

        let updated = goal
            .apply_update(GoalUpdate {
                description: Some(None),
                deadline: Some(None),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.deadline, None);
    }

    #[test]
    fn update_reads_null_as_clear_and_missing_as_keep() {
        let cleared: GoalUpdate =
            serde_json::from_str(r#"{"description": null, "deadline": null}"#).unwrap();
        let missing: GoalUpdate = serde_json::from_str("{}").unwrap();
        let set: GoalUpdate =
            serde_json::from_str(r#"{"deadline": "2026-01-01T00:00:00Z"}"#).unwrap();

        assert_eq!(cleared.description, Some(None));
        assert_eq!(cleared.deadline, Some(None));
        assert_eq!(missing, GoalUpdate::default());
        assert_eq!(set.deadline, Some(Some(datetime!(2026-01-01 00:00 UTC))));
    }

    #[test]
    fn update_rejects_invalid_values() {
        let goal = NewGoal::new("Laptop", dec!(3000), datetime!(2025-10-05 12:00 UTC))
            .unwrap()
            .finalize(1);

        let cases = [
            (
                GoalUpdate {
                    title: Some(String::new()),
                    ..Default::default()
                },
                Error::EmptyGoalTitle,
            ),
            (
                GoalUpdate {
                    target_amount: Some(dec!(0)),
                    ..Default::default()
                },
                Error::NonPositiveTarget("0".to_owned()),
            ),
            (
                GoalUpdate {
                    current_amount: Some(dec!(-10)),
                    ..Default::default()
                },
                Error::NegativeAmount("-10".to_owned()),
            ),
        ];

        for (update, want) in cases {
            assert_eq!(goal.clone().apply_update(update), Err(want));
        }
    }
}
