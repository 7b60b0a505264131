//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/goals/{goal_id}', use [format_endpoint].

/// The root route which greets the client.
pub const ROOT: &str = "/";
/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route for the income, expense and balance totals of transactions.
pub const BALANCE_SUMMARY: &str = "/transactions/summary/balance";
/// The route for the per-category totals of transactions.
pub const CATEGORY_SUMMARY: &str = "/transactions/summary/category";
/// The route to create and list goals.
pub const GOALS: &str = "/goals";
/// The route to access a single goal.
pub const GOAL: &str = "/goals/{goal_id}";
/// The route to add progress to a goal.
pub const GOAL_PROGRESS: &str = "/goals/{goal_id}/progress";
/// The route to ask the assistant a question.
pub const ASSISTANT: &str = "/assistant";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/goals/{goal_id}', '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path contains a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
