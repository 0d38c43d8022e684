//! Defines the core transaction type and the operations for reading and
//! writing transactions in the database document.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    database::{load_database, save_database},
    pagination::PageItem,
    user::UserId,
};

/// A newtype wrapper for the opaque string IDs given to transactions.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an existing transaction ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a new, random transaction ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, shown to users as income.
    Credit,
    /// Money going out, shown to users as an expense.
    Debit,
}

impl TransactionType {
    /// The name shown to users.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Credit => "Income",
            TransactionType::Debit => "Expense",
        }
    }

    /// The name as stored in the database document and sent in forms.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and [add_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// The amount of money, always greater than or equal to zero.
    pub amount: f64,
    /// Whether the money came in or went out.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction was created, in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, type_: TransactionType, description: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            type_,
            description: description.to_owned(),
        }
    }

    /// The creation time as a date-time in UTC.
    pub fn created_at_utc(&self) -> OffsetDateTime {
        let nanos = i128::from(self.created_at) * 1_000_000;

        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

impl PageItem for Transaction {
    fn page_id(&self) -> &str {
        self.id.as_str()
    }

    fn page_timestamp(&self) -> i64 {
        self.created_at
    }
}

/// Builder for creating a new [Transaction].
///
/// The ID, owner and creation time are set by [add_transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The amount of money, always greater than or equal to zero.
    pub amount: f64,
    /// Whether the money came in or went out.
    pub type_: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// The current time in milliseconds since the Unix epoch.
fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Add a new transaction to the front of the user's transaction list.
///
/// # Errors
///
/// Returns [Error::UnknownUser] if the user has no transaction list, or an
/// error if the database document cannot be loaded or saved.
pub fn add_transaction(
    user_id: &UserId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut database = load_database(connection)?;

    let transactions = database
        .transactions
        .get_mut(user_id)
        .ok_or_else(|| Error::UnknownUser(user_id.clone()))?;

    let transaction = Transaction {
        id: TransactionId::generate(),
        user_id: user_id.clone(),
        amount: builder.amount,
        type_: builder.type_,
        description: builder.description,
        created_at: now_millis(),
    };

    transactions.insert(0, transaction.clone());
    save_database(&database, connection)?;

    Ok(transaction)
}

/// Replace the transaction in the user's list that has the same ID as `transaction`.
///
/// The replacement keeps the position of the original in the list.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if the user has no transaction with that ID,
/// - [Error::UnknownUser] if the user has no transaction list,
/// - or an error if the database document cannot be loaded or saved.
pub fn update_transaction(
    user_id: &UserId,
    transaction: &Transaction,
    connection: &Connection,
) -> Result<(), Error> {
    let mut database = load_database(connection)?;

    let transactions = database
        .transactions
        .get_mut(user_id)
        .ok_or_else(|| Error::UnknownUser(user_id.clone()))?;

    let existing = transactions
        .iter_mut()
        .find(|existing| existing.id == transaction.id)
        .ok_or(Error::NotFound)?;

    *existing = transaction.clone();
    save_database(&database, connection)
}

/// Remove the transaction with the ID `transaction_id` from the user's list.
///
/// Deleting a transaction that is not in the list leaves the list unchanged.
///
/// # Errors
///
/// Returns [Error::UnknownUser] if the user has no transaction list, or an
/// error if the database document cannot be loaded or saved.
pub fn delete_transaction(
    user_id: &UserId,
    transaction_id: &TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let mut database = load_database(connection)?;

    let transactions = database
        .transactions
        .get_mut(user_id)
        .ok_or_else(|| Error::UnknownUser(user_id.clone()))?;

    transactions.retain(|transaction| transaction.id != *transaction_id);
    save_database(&database, connection)
}

/// Get the user's transactions, newest first.
///
/// A user without a transaction list gets an empty list.
///
/// # Errors
///
/// Returns an error if the database document cannot be loaded.
pub fn get_user_transactions(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    Ok(load_database(connection)?
        .transactions
        .remove(user_id)
        .unwrap_or_default())
}

/// Get one of the user's transactions.
///
/// # Errors
///
/// Returns [Error::NotFound] if the user has no transaction with that ID.
pub fn get_transaction(
    user_id: &UserId,
    transaction_id: &TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    get_user_transactions(user_id, connection)?
        .into_iter()
        .find(|transaction| transaction.id == *transaction_id)
        .ok_or(Error::NotFound)
}

/// Get every user's transactions merged into one list, newest first.
///
/// # Errors
///
/// Returns an error if the database document cannot be loaded.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let mut transactions: Vec<Transaction> = load_database(connection)?
        .transactions
        .into_values()
        .flatten()
        .collect();

    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(transactions)
}
