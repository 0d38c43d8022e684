//! Sets up the SQLite file that backs the application's key-value storage.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, storage::create_storage_table};

/// Create the tables the application needs if they do not already exist.
///
/// The database document itself is created lazily the first time it is loaded.
///
/// # Errors
///
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_storage_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
