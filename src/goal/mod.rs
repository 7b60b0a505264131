//! Savings goals and the progress made towards them.
//!
//! This module contains:
//! - The `Goal` model, its lifecycle and the rules for editing goals
//! - The progress rule that completes goals once their target is reached
//! - Route handlers for creating, querying, editing, deleting and funding goals

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod progress;
mod query;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, pagination::PaginationConfig, stores::GoalStore};

pub use self::core::{Goal, GoalStatus, GoalUpdate, NewGoal, create_goal_table, map_goal_row};
pub use create_endpoint::create_goal_endpoint;
pub use delete_endpoint::delete_goal_endpoint;
pub use edit_endpoint::edit_goal_endpoint;
pub use progress::{apply_progress, update_goal_progress_endpoint};
pub use query::{get_goal_endpoint, list_goals_endpoint};

/// The state needed by the goal route handlers.
#[derive(Clone)]
pub struct GoalState {
    /// The store for managing goals.
    pub goal_store: Arc<dyn GoalStore>,
    /// The canonical timezone used to timestamp new goals.
    pub local_timezone: String,
    /// Limits for listing goals.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for GoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            goal_store: state.goal_store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
