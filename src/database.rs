//! The database document: every user and every transaction, stored as one JSON value.
//!
//! All reads deserialize a fresh copy of the document and all writes replace
//! it in full. Callers that mutate the document should hold the connection
//! lock from load to save.

use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    storage::{get_item, set_item},
    transaction::Transaction,
    user::{User, UserId},
};

/// The storage key the database document is saved under.
pub const DATABASE_KEY: &str = "expense_tracker_db";

/// The whole application database.
///
/// Every key in `transactions` is the ID of a user in `users`. Each list is
/// ordered newest-first since new transactions are prepended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Users keyed by their ID.
    pub users: BTreeMap<UserId, User>,
    /// Each user's transactions keyed by the user's ID.
    pub transactions: BTreeMap<UserId, Vec<Transaction>>,
}

impl Database {
    /// Find the first user with the given email by checking each user in turn.
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }
}

/// Load the database document.
///
/// If no document has been stored yet, an empty one is created, saved and returned.
///
/// # Errors
///
/// Returns [Error::StorageCorruption] if the stored document cannot be parsed,
/// or an SQL error if the storage cannot be read or written.
pub fn load_database(connection: &Connection) -> Result<Database, Error> {
    match get_item(DATABASE_KEY, connection)? {
        Some(document) => Ok(serde_json::from_str(&document)?),
        None => {
            tracing::info!("No database document found, creating an empty one");
            let database = Database::default();
            save_database(&database, connection)?;
            Ok(database)
        }
    }
}

/// Overwrite the stored database document with `database`.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized or written.
pub fn save_database(database: &Database, connection: &Connection) -> Result<(), Error> {
    let document = serde_json::to_string(database)
        .inspect_err(|error| tracing::error!("could not serialize database: {error}"))
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    set_item(DATABASE_KEY, &document, connection)
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        Error,
        db::initialize,
        storage::{get_item, set_item},
        transaction::{Transaction, TransactionId, TransactionType},
        user::{Role, User, UserId},
    };

    use super::{DATABASE_KEY, Database, load_database, save_database};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not initialize database");

        conn
    }

    fn test_database() -> Database {
        let user = User {
            id: UserId::new("u1"),
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password: "hunter2".to_owned(),
            role: Role::User,
        };
        let transaction = Transaction {
            id: TransactionId::new("t1"),
            user_id: user.id.clone(),
            amount: 50.0,
            type_: TransactionType::Credit,
            description: "pay".to_owned(),
            created_at: 1_700_000_000_000,
        };

        let mut database = Database::default();
        database
            .transactions
            .insert(user.id.clone(), vec![transaction]);
        database.users.insert(user.id.clone(), user);

        database
    }

    #[test]
    fn load_creates_and_persists_empty_database() {
        let conn = get_db_connection();

        let database = load_database(&conn).unwrap();

        assert_eq!(database, Database::default());
        let stored = get_item(DATABASE_KEY, &conn).unwrap();
        assert_eq!(stored, Some(r#"{"users":{},"transactions":{}}"#.to_owned()));
    }

    #[test]
    fn load_twice_returns_equal_databases() {
        let conn = get_db_connection();
        save_database(&test_database(), &conn).unwrap();

        let first = load_database(&conn).unwrap();
        let second = load_database(&conn).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn save_then_load_returns_saved_database() {
        let conn = get_db_connection();
        let want = test_database();

        save_database(&want, &conn).unwrap();
        let got = load_database(&conn).unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn document_uses_expected_json_layout() {
        let conn = get_db_connection();
        save_database(&test_database(), &conn).unwrap();

        let stored = get_item(DATABASE_KEY, &conn).unwrap().unwrap();
        let got: serde_json::Value = serde_json::from_str(&stored).unwrap();

        let want = json!({
            "users": {
                "u1": {
                    "id": "u1",
                    "name": "Alice",
                    "email": "alice@example.com",
                    "password": "hunter2",
                    "role": "user"
                }
            },
            "transactions": {
                "u1": [{
                    "id": "t1",
                    "userId": "u1",
                    "amount": 50.0,
                    "type": "credit",
                    "description": "pay",
                    "createdAt": 1_700_000_000_000_i64
                }]
            }
        });
        assert_eq!(got, want);
    }

    #[test]
    fn load_accepts_integer_amounts() {
        let conn = get_db_connection();
        set_item(
            DATABASE_KEY,
            r#"{"users":{},"transactions":{"u1":[{"id":"t1","userId":"u1","amount":5,"type":"debit","description":"x","createdAt":1}]}}"#,
            &conn,
        )
        .unwrap();

        let database = load_database(&conn).unwrap();

        assert_eq!(database.transactions[&UserId::new("u1")][0].amount, 5.0);
    }

    #[test]
    fn load_fails_on_corrupt_document() {
        let conn = get_db_connection();
        set_item(DATABASE_KEY, "{not json", &conn).unwrap();

        let result = load_database(&conn);

        assert!(
            matches!(result, Err(Error::StorageCorruption(_))),
            "want storage corruption error, got {result:?}"
        );
    }

    #[test]
    fn find_user_by_email_is_case_sensitive() {
        let database = test_database();

        assert!(database.find_user_by_email("alice@example.com").is_some());
        assert!(database.find_user_by_email("Alice@example.com").is_none());
    }
}
