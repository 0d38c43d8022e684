//! A persistent key-value store backed by a single SQLite table.
//!
//! Every value is a string and every key holds at most one value, so writing
//! a key replaces whatever was there before.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Create the key-value table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Get the value stored under `key`, or `None` if nothing is stored there.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_item(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .prepare("SELECT value FROM storage WHERE key = :key")?
        .query_row(&[(":key", key)], |row| row.get(0))
        .optional()
        .map_err(|error| error.into())
}

/// Store `value` under `key`, overwriting any existing value.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn set_item(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO storage (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}

/// Remove the value stored under `key`. Removing a missing key is a no-op.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn remove_item(key: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM storage WHERE key = ?1", (key,))?;

    Ok(())
}

#[cfg(test)]
mod storage_tests {
    use rusqlite::Connection;

    use super::{create_storage_table, get_item, remove_item, set_item};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        create_storage_table(&conn).expect("Could not create storage table");

        conn
    }

    #[test]
    fn get_missing_key_returns_none() {
        let conn = get_db_connection();

        assert_eq!(get_item("missing", &conn), Ok(None));
    }

    #[test]
    fn set_then_get_returns_value() {
        let conn = get_db_connection();

        set_item("greeting", "hello", &conn).unwrap();

        assert_eq!(get_item("greeting", &conn), Ok(Some("hello".to_owned())));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let conn = get_db_connection();
        set_item("greeting", "hello", &conn).unwrap();

        set_item("greeting", "goodbye", &conn).unwrap();

        assert_eq!(get_item("greeting", &conn), Ok(Some("goodbye".to_owned())));
    }

    #[test]
    fn remove_deletes_value() {
        let conn = get_db_connection();
        set_item("greeting", "hello", &conn).unwrap();

        remove_item("greeting", &conn).unwrap();

        assert_eq!(get_item("greeting", &conn), Ok(None));
    }

    #[test]
    fn remove_missing_key_succeeds() {
        let conn = get_db_connection();

        assert_eq!(remove_item("missing", &conn), Ok(()));
    }

    #[test]
    fn keys_are_independent() {
        let conn = get_db_connection();
        set_item("a", "1", &conn).unwrap();
        set_item("b", "2", &conn).unwrap();

        remove_item("a", &conn).unwrap();

        assert_eq!(get_item("b", &conn), Ok(Some("2".to_owned())));
    }
}
