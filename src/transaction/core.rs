//! Defines the core data models and table schema for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, categorizer::categorize, database_id::TransactionId, db::get_decimal};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type \"{other}\"")),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a transaction was for.
///
/// Variants are declared in the order summaries are reported in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    Food,
    /// Entertainment and hobbies.
    Leisure,
    /// Doctors, pharmacies and insurance.
    Health,
    /// Rent, utilities and subscriptions.
    Bills,
    /// Public transport, taxis and fuel.
    Transport,
    /// Anything that does not fit another category.
    #[default]
    Other,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Leisure,
        Category::Health,
        Category::Bills,
        Category::Transport,
        Category::Other,
    ];

    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Leisure => "leisure",
            Category::Health => "health",
            Category::Bills => "bills",
            Category::Transport => "transport",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown category \"{s}\""))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. Never negative.
    pub amount: Decimal,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// What the transaction was for.
    pub category: Category,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Start building a new transaction.
    ///
    /// The category defaults to the result of [categorize] on `description`.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if `amount` is less than zero.
    pub fn build(
        description: &str,
        amount: Decimal,
        transaction_type: TransactionType,
        date: OffsetDateTime,
    ) -> Result<TransactionBuilder, Error> {
        Ok(TransactionBuilder {
            description: description.to_owned(),
            amount: validate_amount(amount)?,
            transaction_type,
            category: categorize(description),
            date,
        })
    }

    /// Return a copy of this transaction with the fields set in `update` replaced.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if the updated amount is less than zero.
    pub fn apply_update(self, update: TransactionUpdate) -> Result<Self, Error> {
        let amount = match update.amount {
            Some(amount) => validate_amount(amount)?,
            None => self.amount,
        };

        Ok(Self {
            id: self.id,
            description: update.description.unwrap_or(self.description),
            amount,
            transaction_type: update.transaction_type.unwrap_or(self.transaction_type),
            category: update.category.unwrap_or(self.category),
            date: update.date.unwrap_or(self.date),
        })
    }
}

fn validate_amount(amount: Decimal) -> Result<Decimal, Error> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(Error::NegativeAmount(amount.to_string()))
    } else {
        Ok(amount)
    }
}

/// A validated transaction that has not been stored yet.
///
/// Stores assign the ID when the transaction is created.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) transaction_type: TransactionType,
    pub(crate) category: Category,
    pub(crate) date: OffsetDateTime,
}

impl TransactionBuilder {
    /// Override the automatically assigned category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Attach `id` to produce the stored transaction.
    pub(crate) fn finalize(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            date: self.date,
        }
    }
}

/// The fields of a transaction to change. Fields set to `None` are left as is.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// The new description.
    pub description: Option<String>,
    /// The new amount, must not be negative.
    pub amount: Option<Decimal>,
    /// The new transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// The new category.
    pub category: Option<Category>,
    /// The new date.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_type_category
            ON \"transaction\"(type, category);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns `id, description, amount, type, category, date` in order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: get_decimal(row, 2)?,
        transaction_type: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use crate::{
        Error,
        transaction::{Category, Transaction, TransactionType, TransactionUpdate},
    };

    #[test]
    fn build_assigns_category_from_description() {
        let builder = Transaction::build(
            "Uber to the airport",
            dec!(42.50),
            TransactionType::Expense,
            datetime!(2025-10-05 12:00 UTC),
        )
        .unwrap();

        assert_eq!(builder.category, Category::Transport);
    }

    #[test]
    fn explicit_category_overrides_categorizer() {
        let builder = Transaction::build(
            "Uber Eats",
            dec!(30),
            TransactionType::Expense,
            datetime!(2025-10-05 12:00 UTC),
        )
        .unwrap()
        .category(Category::Food);

        assert_eq!(builder.category, Category::Food);
    }

    #[test]
    fn build_fails_on_negative_amount() {
        let result = Transaction::build(
            "Refund",
            dec!(-0.01),
            TransactionType::Income,
            datetime!(2025-10-05 12:00 UTC),
        );

        assert_eq!(result, Err(Error::NegativeAmount("-0.01".to_owned())));
    }

    #[test]
    fn build_accepts_zero() {
        let result = Transaction::build(
            "Free sample",
            dec!(0),
            TransactionType::Expense,
            datetime!(2025-10-05 12:00 UTC),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn apply_update_only_changes_set_fields() {
        let transaction = Transaction::build(
            "Rent",
            dec!(1200.00),
            TransactionType::Expense,
            datetime!(2025-10-01 09:00 UTC),
        )
        .unwrap()
        .finalize(1);

        let updated = transaction
            .clone()
            .apply_update(TransactionUpdate {
                description: Some("Rent (updated)".to_owned()),
                amount: Some(dec!(1300.00)),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.description, "Rent (updated)");
        assert_eq!(updated.amount, dec!(1300.00));
        assert_eq!(updated.transaction_type, transaction.transaction_type);
        assert_eq!(updated.category, transaction.category);
        assert_eq!(updated.date, transaction.date);
    }

    #[test]
    fn apply_update_rejects_negative_amount() {
        let transaction = Transaction::build(
            "Rent",
            dec!(1200.00),
            TransactionType::Expense,
            datetime!(2025-10-01 09:00 UTC),
        )
        .unwrap()
        .finalize(1);

        let result = transaction.apply_update(TransactionUpdate {
            amount: Some(dec!(-5)),
            ..Default::default()
        });

        assert_eq!(result, Err(Error::NegativeAmount("-5".to_owned())));
    }

    #[test]
    fn serializes_type_field_and_lowercase_enums() {
        let transaction = Transaction::build(
            "Salary",
            dec!(5000.00),
            TransactionType::Income,
            datetime!(2025-10-01 09:00 UTC),
        )
        .unwrap()
        .finalize(7);

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["type"], "income");
        assert_eq!(json["category"], "other");
        assert_eq!(json["amount"], "5000.00");
        assert_eq!(json["date"], "2025-10-01T09:00:00Z");
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }
}
