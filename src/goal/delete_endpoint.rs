use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{database_id::GoalId, extract::AppPath, goal::GoalState};

/// A route handler for deleting a goal.
pub async fn delete_goal_endpoint(
    State(state): State<GoalState>,
    AppPath(goal_id): AppPath<GoalId>,
) -> Response {
    match state.goal_store.delete(goal_id) {
        Ok(()) => {
            tracing::info!("Deleted goal {goal_id}");
            Json(json!({ "message": format!("Goal {goal_id} deleted") })).into_response()
        }
        Err(error) => error.into_response(),
    }
}
