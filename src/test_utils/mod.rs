#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    AppState,
    db::initialize,
    pagination::PaginationConfig,
    transaction::{Transaction, TransactionType, add_transaction},
    user::{NewUser, Role, User, create_user},
};

pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, select_text};
pub(crate) use http::{assert_hx_redirect, assert_redirect, assert_status_ok};

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

pub(crate) fn get_test_app_state(page_size: usize) -> AppState {
    AppState {
        local_timezone: "Etc/UTC".to_owned(),
        pagination_config: PaginationConfig { page_size },
        db_connection: Arc::new(Mutex::new(get_test_connection())),
    }
}

pub(crate) fn insert_test_user(name: &str, role: Role, connection: &Connection) -> User {
    create_user(
        NewUser {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "hunter2".to_owned(),
            role,
        },
        connection,
    )
    .unwrap()
}

pub(crate) fn insert_test_transaction(
    user: &User,
    amount: f64,
    type_: TransactionType,
    description: &str,
    connection: &Connection,
) -> Transaction {
    add_transaction(
        &user.id,
        Transaction::build(amount, type_, description),
        connection,
    )
    .unwrap()
}
