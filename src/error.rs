//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::goal::GoalStatus;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Progress was applied to a goal that is no longer active.
    ///
    /// Completed and cancelled goals are terminal, so the client should not
    /// retry the request.
    #[error("cannot update the progress of a {0} goal")]
    InvalidState(GoalStatus),

    /// A transaction amount was negative.
    ///
    /// Whether money came in or went out is recorded by the transaction type,
    /// so amounts are always zero or greater.
    #[error("transaction amounts must not be negative, got {0}")]
    NegativeAmount(String),

    /// A goal was given a target amount of zero or less.
    #[error("goal target amounts must be greater than zero, got {0}")]
    NonPositiveTarget(String),

    /// A goal progress update was zero or negative.
    ///
    /// Corrections to a goal's progress should be made by editing the goal.
    #[error("progress amounts must be greater than zero, got {0}")]
    InvalidProgressAmount(String),

    /// The request body, query string or path could not be parsed.
    ///
    /// The message describes which part of the request was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An empty string was used as a goal title.
    #[error("goal title cannot be empty")]
    EmptyGoalTitle,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A value read from the database could not be converted to its domain type.
    #[error("invalid value stored in the database: {0}")]
    InvalidStoredValue(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            rusqlite::Error::FromSqlConversionFailure(column, _, error) => {
                tracing::error!("could not convert the value in column {column}: {error}");
                Error::InvalidStoredValue(format!("column {column}: {error}"))
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// The HTTP status code.
    pub code: u16,
    /// A human readable description of the error.
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidState(_) => StatusCode::CONFLICT,
            Error::NegativeAmount(_)
            | Error::NonPositiveTarget(_)
            | Error::InvalidProgressAmount(_)
            | Error::InvalidRequest(_)
            | Error::EmptyGoalTitle => StatusCode::BAD_REQUEST,
            Error::InvalidTimezoneError(_)
            | Error::InvalidStoredValue(_)
            | Error::DatabaseLockError
            | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            Error::InvalidTimezoneError(timezone) => format!(
                "Could not get local timezone \"{timezone}\". Check your server settings and \
                ensure the timezone has been set to valid, canonical timezone string"
            ),
            // Internal details are logged, not sent to the client.
            error if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("An unexpected error occurred: {}", error);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        let body = ErrorBody {
            code: status.as_u16(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
