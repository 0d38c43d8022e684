//! Defines the route handler for logging out the current user.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    Error,
    auth::{AuthState, log_out},
    endpoints,
};

/// Invalidate the session and redirect the client to the log-in page.
pub async fn get_log_out(State(state): State<AuthState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    log_out(&connection)?;
    tracing::info!("Logged out");

    Ok(Redirect::to(endpoints::LOG_IN_VIEW).into_response())
}
