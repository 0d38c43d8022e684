//! The current session: the ID of the logged in user, stored apart from the database document.
//!
//! There is one session per database file. Logging in on any client replaces it.

use rusqlite::Connection;

use crate::{
    Error,
    storage::{get_item, remove_item, set_item},
    user::UserId,
};

/// The storage key the session is saved under.
pub const SESSION_KEY: &str = "expense_tracker_session";

/// Make `user_id` the current session, replacing any previous session.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub fn save_session(user_id: &UserId, connection: &Connection) -> Result<(), Error> {
    set_item(SESSION_KEY, user_id.as_str(), connection)
}

/// Get the ID of the logged in user, if any.
///
/// The ID is not checked against the database document.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub fn get_session(connection: &Connection) -> Result<Option<UserId>, Error> {
    Ok(get_item(SESSION_KEY, connection)?.map(UserId::new))
}

/// End the current session. Clearing an empty session is a no-op.
///
/// # Errors
///
/// Returns an error if the session cannot be removed.
pub fn clear_session(connection: &Connection) -> Result<(), Error> {
    remove_item(SESSION_KEY, connection)
}
