//! Logging in, signing up, logging out and working out who the current user is.
//!
//! A client is either anonymous or authenticated as a user with a role.
//! Logging in or signing up moves an anonymous client to authenticated and
//! logging out moves it back.

use rusqlite::Connection;

use crate::{
    Error,
    database::load_database,
    endpoints,
    session::{clear_session, get_session, save_session},
    user::{NewUser, User, create_user},
};

/// Who the current client is.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    /// Nobody is logged in, or the session refers to a user that no longer exists.
    Anonymous,
    /// The logged in user.
    Authenticated(User),
}

impl Identity {
    /// The page the client should see when visiting the root URL.
    pub fn home_endpoint(&self) -> &'static str {
        match self {
            Identity::Anonymous => endpoints::LOG_IN_VIEW,
            Identity::Authenticated(user) => user.role.home_endpoint(),
        }
    }
}

/// Find the user whose email and password both match exactly and start a session for them.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if no user matches, or an error if the
/// database document or session cannot be accessed.
pub fn log_in(email: &str, password: &str, connection: &Connection) -> Result<User, Error> {
    let database = load_database(connection)?;

    let user = database
        .users
        .values()
        .find(|user| user.email == email && user.password == password)
        .cloned()
        .ok_or(Error::InvalidCredentials)?;

    save_session(&user.id, connection)?;
    tracing::info!("User {} logged in", user.id);

    Ok(user)
}

/// Create a user if their email is not taken and start a session for them.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] without changing the database if another
/// user has the same email, or an error if the database document or session
/// cannot be accessed.
pub fn sign_up(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    if load_database(connection)?
        .find_user_by_email(&new_user.email)
        .is_some()
    {
        return Err(Error::DuplicateEmail(new_user.email));
    }

    let user = create_user(new_user, connection)?;
    save_session(&user.id, connection)?;

    Ok(user)
}

/// End the current session.
///
/// # Errors
///
/// Returns an error if the session cannot be removed.
pub fn log_out(connection: &Connection) -> Result<(), Error> {
    clear_session(connection)
}

/// Work out who the current client is from the session.
///
/// # Errors
///
/// Returns an error if the database document or session cannot be read.
pub fn current_identity(connection: &Connection) -> Result<Identity, Error> {
    let Some(user_id) = get_session(connection)? else {
        return Ok(Identity::Anonymous);
    };

    match load_database(connection)?.users.remove(&user_id) {
        Some(user) => Ok(Identity::Authenticated(user)),
        None => {
            tracing::warn!("Session refers to unknown user {user_id}");
            Ok(Identity::Anonymous)
        }
    }
}
