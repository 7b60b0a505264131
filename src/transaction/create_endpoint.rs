use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    extract::AppJson,
    timezone::now_in_timezone,
    transaction::{Category, Transaction, TransactionBuilder, TransactionState, TransactionType},
};

/// The request body for creating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTransactionForm {
    /// What the transaction was for.
    pub description: String,
    /// How much money was spent or earned.
    pub amount: Decimal,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Assigned from the description when not given.
    pub category: Option<Category>,
    /// Defaults to the current time in the server's timezone.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

impl CreateTransactionForm {
    fn into_builder(self, local_timezone: &str) -> Result<TransactionBuilder, Error> {
        let date = match self.date {
            Some(date) => date,
            None => now_in_timezone(local_timezone)?,
        };

        let builder = Transaction::build(&self.description, self.amount, self.transaction_type, date)?;

        Ok(match self.category {
            Some(category) => builder.category(category),
            None => builder,
        })
    }
}

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created`, the new transaction and its location.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    AppJson(form): AppJson<CreateTransactionForm>,
) -> Response {
    let builder = match form.into_builder(&state.local_timezone) {
        Ok(builder) => builder,
        Err(error) => return error.into_response(),
    };

    match state.transaction_store.create(builder) {
        Ok(transaction) => {
            tracing::debug!(
                "Created {} transaction {} in category {}",
                transaction.transaction_type,
                transaction.id,
                transaction.category
            );
            let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

            (StatusCode::CREATED, [(LOCATION, location)], Json(transaction)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}
