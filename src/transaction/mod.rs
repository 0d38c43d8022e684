//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Functions for storing, querying, and managing transactions in the database document
//! - View handlers for transaction-related web pages

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod table;
mod transactions_page;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, TransactionType, add_transaction,
    delete_transaction, get_all_transactions, get_transaction, get_user_transactions,
    update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use table::{
    recent_transactions_table, transaction_cells, transaction_rows, transactions_table,
};
pub use transactions_page::{TransactionsViewState, get_transaction_rows, get_transactions_page};
