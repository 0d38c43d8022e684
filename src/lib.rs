//! An expense tracker web app.
//!
//! Users record credit and debit transactions and see their totals on a
//! dashboard. Admins see totals across every user and can inspect a single
//! user's transactions.
//!
//! All application data lives in one JSON document stored in a key-value
//! table in SQLite. The logged in user is tracked by a single session entry
//! in the same table.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod admin;
mod alert;
mod app_state;
mod auth;
mod dashboard;
mod database;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod session;
mod storage;
mod timezone;
mod totals;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{Identity, current_identity, log_in, log_out, sign_up};
pub use database::{DATABASE_KEY, Database, load_database, save_database};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use session::{SESSION_KEY, clear_session, get_session, save_session};
pub use totals::{Totals, calculate_totals};
pub use transaction::{
    Transaction, TransactionBuilder, TransactionId, TransactionType, add_transaction,
    delete_transaction, get_user_transactions, update_transaction,
};
pub use user::{NewUser, Role, User, UserId, create_user, get_user_by_id};

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
            Ok(mut signal) => {
                signal.recv().await;
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
