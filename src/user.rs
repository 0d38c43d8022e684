//! Users of the application and the operations for creating and fetching them.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Error,
    database::{load_database, save_database},
    endpoints,
};

/// A newtype wrapper for the opaque string IDs given to users.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an existing user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a new, random user ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What a user is allowed to see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can view every user and their transactions, but has no transactions of their own.
    Admin,
    /// Can manage their own transactions.
    #[default]
    User,
}

impl Role {
    /// The page a user with this role lands on after logging in.
    pub fn home_endpoint(self) -> &'static str {
        match self {
            Role::Admin => endpoints::ADMIN_DASHBOARD_VIEW,
            Role::User => endpoints::DASHBOARD_VIEW,
        }
    }

    /// The name of the role as stored in the database document.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user of the application.
///
/// The password is stored and compared as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
    /// The email the user logs in with.
    pub email: String,
    /// The password the user logs in with.
    pub password: String,
    /// What the user is allowed to see.
    pub role: Role,
}

/// The data needed to create a user. The ID is generated on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's display name.
    pub name: String,
    /// The email the user logs in with.
    pub email: String,
    /// The password the user logs in with.
    pub password: String,
    /// What the user is allowed to see.
    pub role: Role,
}

/// Create a user with a fresh ID and an empty transaction list.
///
/// Email uniqueness is not checked here, see [crate::auth::sign_up].
///
/// # Errors
///
/// Returns an error if the database document cannot be loaded or saved.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    let mut database = load_database(connection)?;

    let user = User {
        id: UserId::generate(),
        name: new_user.name,
        email: new_user.email,
        password: new_user.password,
        role: new_user.role,
    };

    database.users.insert(user.id.clone(), user.clone());
    database.transactions.insert(user.id.clone(), Vec::new());
    save_database(&database, connection)?;

    tracing::info!("Created {} user {}", user.role, user.id);

    Ok(user)
}

/// Get the user with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: &UserId, connection: &Connection) -> Result<User, Error> {
    load_database(connection)?
        .users
        .remove(user_id)
        .ok_or(Error::NotFound)
}

/// Get every user, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database document cannot be loaded.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    Ok(load_database(connection)?.users.into_values().collect())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns an error if the database document cannot be loaded.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    Ok(load_database(connection)?.users.len())
}
