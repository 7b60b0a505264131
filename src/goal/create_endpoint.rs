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
    goal::{GoalState, NewGoal},
    timezone::now_in_timezone,
};

/// The request body for creating a goal.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGoalForm {
    /// A short name for the goal.
    pub title: String,
    /// Optional notes about the goal.
    #[serde(default)]
    pub description: Option<String>,
    /// The amount to save, must be greater than zero.
    pub target_amount: Decimal,
    /// When the goal should be reached by.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deadline: Option<OffsetDateTime>,
}

impl CreateGoalForm {
    fn into_new_goal(self, local_timezone: &str) -> Result<NewGoal, Error> {
        let created_at = now_in_timezone(local_timezone)?;

        Ok(NewGoal::new(&self.title, self.target_amount, created_at)?
            .description(self.description)
            .deadline(self.deadline))
    }
}

/// A route handler for creating a new goal.
///
/// Responds with `201 Created`, the new goal and its location.
pub async fn create_goal_endpoint(
    State(state): State<GoalState>,
    AppJson(form): AppJson<CreateGoalForm>,
) -> Response {
    let new_goal = match form.into_new_goal(&state.local_timezone) {
        Ok(new_goal) => new_goal,
        Err(error) => return error.into_response(),
    };

    match state.goal_store.create(new_goal) {
        Ok(goal) => {
            tracing::info!("Created goal {} \"{}\"", goal.id, goal.title);
            let location = format_endpoint(endpoints::GOAL, goal.id);

            (StatusCode::CREATED, [(LOCATION, location)], Json(goal)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create goal: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        endpoints,
        error::ErrorBody,
        goal::{Goal, GoalStatus},
        test_utils::get_test_server,
    };

    #[tokio::test]
    async fn create_goal_starts_active() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GOALS)
            .json(&json!({
                "title": "Trip to Europe",
                "description": "Two weeks in summer",
                "target_amount": "3000.00",
                "deadline": "2026-06-01T00:00:00Z",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_header("location", "/goals/1");
        let goal = response.json::<Goal>();
        assert_eq!(goal.id, 1);
        assert_eq!(goal.title, "Trip to Europe");
        assert_eq!(goal.description.as_deref(), Some("Two weeks in summer"));
        assert_eq!(goal.target_amount, dec!(3000.00));
        assert_eq!(goal.current_amount, Decimal::ZERO);
        assert_eq!(goal.deadline, Some(datetime!(2026-06-01 00:00 UTC)));
        assert_eq!(goal.status, GoalStatus::Active);
    }

    #[tokio::test]
    async fn create_goal_without_optional_fields() {
        let server = get_test_server();

        let goal = server
            .post(endpoints::GOALS)
            .json(&json!({
                "title": "Emergency fund",
                "target_amount": 1000,
            }))
            .await
            .json::<Goal>();

        assert_eq!(goal.description, None);
        assert_eq!(goal.deadline, None);
    }

    #[tokio::test]
    async fn create_goal_rejects_zero_target() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GOALS)
            .json(&json!({
                "title": "Nothing",
                "target_amount": "0",
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorBody>().code, 400);
    }

    #[tokio::test]
    async fn create_goal_rejects_blank_title() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GOALS)
            .json(&json!({
                "title": "   ",
                "target_amount": "100",
            }))
            .await;

        response.assert_status_bad_request();
    }
}
