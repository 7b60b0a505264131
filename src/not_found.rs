//! The fallback handler for requests that do not match any route.

use axum::response::{IntoResponse, Response};

use crate::Error;

/// Respond with a JSON `404 Not Found` error.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use crate::{error::ErrorBody, test_utils::get_test_server};

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = get_test_server();

        let response = server.get("/budgets").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<ErrorBody>().code, 404);
    }
}
