#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{PaginationConfig, build_router, stores::sqlite::create_app_state};

/// Create a test server for the full router backed by an in-memory SQLite database.
pub(crate) fn get_test_server() -> TestServer {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = create_app_state(conn, "Etc/UTC", PaginationConfig::default())
        .expect("Could not create app state.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}
