//! Balance and per-category summaries of transactions.
//!
//! All sums use [Decimal], so totals are exact to the cent no matter how many
//! transactions are added up or in which order.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::{Category, Transaction, TransactionType};

/// Income, expense and net totals over a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// The sum of all income amounts.
    pub total_income: Decimal,
    /// The sum of all expense amounts.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
}

/// The total and number of transactions in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category the row summarises.
    pub category: Category,
    /// The sum of the amounts of the transactions in the category.
    pub total_amount: Decimal,
    /// How many transactions are in the category.
    pub transaction_count: usize,
}

/// Sum income and expenses over `transactions`.
///
/// An empty slice produces a summary of zeros.
pub fn compute_balance(transactions: &[Transaction]) -> BalanceSummary {
    let (total_income, total_expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), transaction| match transaction.transaction_type {
            TransactionType::Income => (income + transaction.amount, expense),
            TransactionType::Expense => (income, expense + transaction.amount),
        },
    );

    BalanceSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}

/// Total and count the transactions in each category present in `transactions`.
///
/// Categories without transactions are left out. Rows are ordered by category
/// declaration order.
pub fn compute_category_summary(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut totals: BTreeMap<Category, (Decimal, usize)> = BTreeMap::new();

    for transaction in transactions {
        let (total, count) = totals
            .entry(transaction.category)
            .or_insert((Decimal::ZERO, 0));
        *total += transaction.amount;
        *count += 1;
    }

    totals
        .into_iter()
        .map(|(category, (total_amount, transaction_count))| CategorySummary {
            category,
            total_amount,
            transaction_count,
        })
        .collect()
}
