//! Fintrack is a personal finance tracker.
//!
//! This library provides a JSON REST API for recording income and expense
//! transactions, summarising them, and tracking progress towards savings goals.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod app_state;
mod assistant;
mod categorizer;
mod database_id;
mod db;
mod endpoints;
mod error;
mod extract;
mod goal;
mod logging;
mod not_found;
mod pagination;
mod routing;
mod timezone;
mod transaction;

pub mod stores;

#[cfg(test)]
mod test_utils;

pub use aggregation::{BalanceSummary, CategorySummary, compute_balance, compute_category_summary};
pub use app_state::AppState;
pub use assistant::answer;
pub use categorizer::{categorize, find_category};
pub use database_id::{GoalId, TransactionId};
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorBody};
pub use goal::{Goal, GoalStatus, GoalUpdate, NewGoal, apply_progress};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use timezone::get_local_offset;
pub use transaction::{
    Category, Transaction, TransactionBuilder, TransactionType, TransactionUpdate,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
