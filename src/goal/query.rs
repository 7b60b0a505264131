//! Route handlers for fetching a single goal or a page of goals.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    database_id::GoalId,
    extract::{AppPath, AppQuery},
    goal::{GoalState, GoalStatus},
    stores::GoalQuery,
};

/// The query parameters for listing goals.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Only list goals with this status.
    pub status: Option<GoalStatus>,
    /// The number of matching goals to skip.
    #[serde(default)]
    pub offset: u64,
    /// The maximum number of goals to return.
    pub limit: Option<u64>,
}

/// A route handler for getting a goal by its database ID.
pub async fn get_goal_endpoint(
    State(state): State<GoalState>,
    AppPath(goal_id): AppPath<GoalId>,
) -> Response {
    match state.goal_store.get(goal_id) {
        Ok(goal) => Json(goal).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for listing goals in the order they were created.
pub async fn list_goals_endpoint(
    State(state): State<GoalState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Response {
    let query = GoalQuery {
        status: params.status,
        offset: params.offset,
        limit: Some(state.pagination_config.resolve_limit(params.limit)),
    };

    match state.goal_store.list(&query) {
        Ok(goals) => Json(goals).into_response(),
        Err(error) => {
            tracing::error!("Could not list goals: {error}");
            error.into_response()
        }
    }
}
