//! Application router configuration.

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use crate::{
    AppState,
    assistant::assistant_endpoint,
    endpoints,
    goal::{
        create_goal_endpoint, delete_goal_endpoint, edit_goal_endpoint, get_goal_endpoint,
        list_goals_endpoint, update_goal_progress_endpoint,
    },
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_balance_summary_endpoint, get_category_summary_endpoint, get_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint).get(list_transactions_endpoint),
        )
        .route(
            endpoints::BALANCE_SUMMARY,
            get(get_balance_summary_endpoint),
        )
        .route(
            endpoints::CATEGORY_SUMMARY,
            get(get_category_summary_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::GOALS,
            post(create_goal_endpoint).get(list_goals_endpoint),
        )
        .route(
            endpoints::GOAL,
            get(get_goal_endpoint)
                .put(edit_goal_endpoint)
                .delete(delete_goal_endpoint),
        )
        .route(endpoints::GOAL_PROGRESS, put(update_goal_progress_endpoint))
        .route(endpoints::ASSISTANT, post(assistant_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' greets the client.
async fn get_index() -> Response {
    Json(json!({ "message": "Welcome to the personal finance API!" })).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, PaginationConfig, Transaction,
        endpoints,
        stores::memory::{MemoryGoalStore, MemoryTransactionStore},
        test_utils::get_test_server,
    };

    use super::build_router;

    #[tokio::test]
    async fn root_greets_client() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Welcome to the personal finance API!" })
        );
    }

    #[tokio::test]
    async fn summary_routes_are_not_shadowed_by_transaction_id() {
        let server = get_test_server();

        server
            .get(endpoints::BALANCE_SUMMARY)
            .await
            .assert_status_ok();
        server
            .get(endpoints::CATEGORY_SUMMARY)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let server = get_test_server();

        server
            .patch(endpoints::GOALS)
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn router_works_with_memory_stores() {
        let state = AppState::new(
            Arc::new(MemoryTransactionStore::new()),
            Arc::new(MemoryGoalStore::new()),
            "Etc/UTC",
            PaginationConfig::default(),
        );
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "description": "Taxi",
                "amount": "18.00",
                "type": "expense",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .await
            .json::<Vec<Transaction>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].description, "Taxi");
    }
}
