//! Defines the goal store trait.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::GoalId,
    goal::{Goal, GoalStatus, GoalUpdate, NewGoal},
};

/// Handles the creation, retrieval, modification and deletion of goals.
///
/// Every operation that takes an ID returns [Error::NotFound] if no goal has
/// that ID.
pub trait GoalStore: Send + Sync {
    /// Store a new goal and return it with its assigned ID.
    fn create(&self, new_goal: NewGoal) -> Result<Goal, Error>;

    /// Retrieve a goal from the store.
    fn get(&self, id: GoalId) -> Result<Goal, Error>;

    /// Atomically read, modify and save a goal.
    ///
    /// The stored goal is passed to `modify` and whatever it returns is saved.
    /// No other update to the goal can happen in between. If `modify` returns
    /// an error, the stored goal is left unchanged and the error is returned.
    fn update_with(
        &self,
        id: GoalId,
        modify: &dyn Fn(Goal) -> Result<Goal, Error>,
    ) -> Result<Goal, Error>;

    /// Change the fields of a goal set in `update` and return the result.
    ///
    /// See [Goal::apply_update] for the rules applied to the new values.
    fn update(&self, id: GoalId, update: GoalUpdate) -> Result<Goal, Error> {
        self.update_with(id, &|goal| goal.apply_update(update.clone()))
    }

    /// Remove a goal from the store.
    fn delete(&self, id: GoalId) -> Result<(), Error>;

    /// Retrieve goals from the store in the way defined by `query`, ordered by ID.
    fn list(&self, query: &GoalQuery) -> Result<Vec<Goal>, Error>;
}

/// Defines how goals should be fetched from [GoalStore::list].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalQuery {
    /// Only include goals with this status.
    pub status: Option<GoalStatus>,
    /// Skip this many matching goals.
    #[serde(default)]
    pub offset: u64,
    /// Return at most this many goals. `None` returns every match.
    pub limit: Option<u64>,
}
