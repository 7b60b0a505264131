use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    database_id::TransactionId,
    extract::{AppJson, AppPath},
    transaction::{TransactionState, TransactionUpdate},
};

/// A route handler for editing a transaction.
///
/// Only the fields present in the request body are changed.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    AppPath(transaction_id): AppPath<TransactionId>,
    AppJson(update): AppJson<TransactionUpdate>,
) -> Response {
    match state.transaction_store.update(transaction_id, update) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => {
            tracing::debug!("Could not update transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        error::ErrorBody,
        test_utils::get_test_server,
        transaction::{Category, Transaction, TransactionType},
    };

    #[tokio::test]
    async fn edit_changes_only_given_fields() {
        let server = get_test_server();
        let created = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "Rent",
                "amount": "1200.00",
                "type": "expense",
                "date": "2025-10-02T12:00:00Z",
            }))
            .await
            .json::<Transaction>();
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server
            .put(&path)
            .json(&json!({
                "description": "Rent (updated)",
                "amount": "1300.00",
            }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Transaction>();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "Rent (updated)");
        assert_eq!(updated.amount, dec!(1300.00));
        assert_eq!(updated.transaction_type, TransactionType::Expense);
        assert_eq!(updated.category, Category::Bills);
        assert_eq!(updated.date, created.date);
        assert_eq!(server.get(&path).await.json::<Transaction>(), updated);
    }

    #[tokio::test]
    async fn edit_missing_transaction_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 12))
            .json(&json!({ "amount": "1.00" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn edit_rejects_negative_amount() {
        let server = get_test_server();
        let created = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "Coffee",
                "amount": "4.50",
                "type": "expense",
            }))
            .await
            .json::<Transaction>();
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server
            .put(&path)
            .json(&json!({ "amount": "-4.50" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorBody>().code, 400);
        assert_eq!(server.get(&path).await.json::<Transaction>(), created);
    }
}
