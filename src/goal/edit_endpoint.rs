use std::cell::Cell;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    database_id::GoalId,
    extract::{AppJson, AppPath},
    goal::{Goal, GoalState, GoalStatus, GoalUpdate},
};

/// A route handler for editing a goal.
///
/// Edits may change any field, including the status, and are applied atomically.
pub async fn edit_goal_endpoint(
    State(state): State<GoalState>,
    AppPath(goal_id): AppPath<GoalId>,
    AppJson(update): AppJson<GoalUpdate>,
) -> Response {
    let previous_status = Cell::new(None);

    let result = state.goal_store.update_with(goal_id, &|goal| {
        previous_status.set(Some(goal.status));
        goal.apply_update(update.clone())
    });

    match result {
        Ok(goal) => {
            if let Some(message) = previous_status
                .get()
                .and_then(|previous| status_change_message(previous, &goal))
            {
                tracing::info!("{message}");
            }

            Json(goal).into_response()
        }
        Err(error) => {
            tracing::debug!("Could not update goal {goal_id}: {error}");
            error.into_response()
        }
    }
}

/// Describe the move of `goal` into a terminal status, if the edit made one.
fn status_change_message(previous: GoalStatus, goal: &Goal) -> Option<String> {
    if previous == goal.status {
        return None;
    }

    match goal.status {
        GoalStatus::Completed => Some(format!("Goal {} \"{}\" completed", goal.id, goal.title)),
        GoalStatus::Cancelled => Some(format!("Goal {} \"{}\" cancelled", goal.id, goal.title)),
        GoalStatus::Active => None,
    }
}
