//! Applying progress to savings goals.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::GoalId,
    extract::{AppPath, AppQuery},
    goal::{Goal, GoalState, GoalStatus},
};

/// Add `delta` to the amount saved towards `goal`.
///
/// The goal is completed once the saved amount reaches the target. Completed
/// and cancelled goals are terminal: progress can no longer be applied to them.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidState] if the goal is not active,
/// - or [Error::InvalidProgressAmount] if `delta` is zero or negative.
pub fn apply_progress(mut goal: Goal, delta: Decimal) -> Result<Goal, Error> {
    if goal.status != GoalStatus::Active {
        return Err(Error::InvalidState(goal.status));
    }

    if delta <= Decimal::ZERO {
        return Err(Error::InvalidProgressAmount(delta.to_string()));
    }

    goal.current_amount += delta;

    if goal.is_target_reached() {
        goal.status = GoalStatus::Completed;
    }

    Ok(goal)
}

/// The query string for a progress update, e.g. `?amount=250.00`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressQuery {
    /// The amount to add to the goal.
    pub amount: Decimal,
}

/// A route handler for adding progress to a goal.
///
/// The read-modify-write happens under the store's lock, so concurrent
/// progress updates to the same goal are never lost.
pub async fn update_goal_progress_endpoint(
    State(state): State<GoalState>,
    AppPath(goal_id): AppPath<GoalId>,
    AppQuery(query): AppQuery<ProgressQuery>,
) -> Response {
    let result = state
        .goal_store
        .update_with(goal_id, &|goal| apply_progress(goal, query.amount));

    match result {
        Ok(goal) => {
            if goal.status == GoalStatus::Completed {
                tracing::info!("Goal {} \"{}\" completed", goal.id, goal.title);
            }

            Json(goal).into_response()
        }
        Err(error @ Error::InvalidState(_)) => {
            tracing::debug!("Rejected progress for goal {goal_id}: {error}");
            error.into_response()
        }
        Err(error) => error.into_response(),
    }
}
