//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    transaction::{TransactionId, create_endpoint::TransactionState, delete_transaction},
    user::User,
};

/// A route handler for deleting a transaction.
///
/// Responds with an empty body so the table row is removed, plus an
/// out-of-band success alert. The status code has to be 200 OK or htmx will
/// not swap out the row.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = delete_transaction(&user.id, &transaction_id, &connection) {
        tracing::error!("Could not delete transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    tracing::info!("User {} deleted transaction {transaction_id}", user.id);

    let alert = Alert::Success {
        message: "Transaction deleted".to_owned(),
        details: String::new(),
    };

    html! {
        div id="alert-container" hx-swap-oob="innerHTML" { (alert.into_html()) }
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{FromRef, Path, State},
    };

    use crate::{
        test_utils::{
            assert_status_ok, get_test_app_state, insert_test_transaction, insert_test_user,
            parse_html_fragment,
        },
        transaction::{
            TransactionId, TransactionType, create_endpoint::TransactionState,
            get_user_transactions,
        },
        user::Role,
    };

    use super::delete_transaction_endpoint;

    #[tokio::test]
    async fn deletes_only_the_given_transaction() {
        let app_state = get_test_app_state(20);
        let (user, a, b, c) = {
            let connection = app_state.db_connection.lock().unwrap();
            let user = insert_test_user("Alice", Role::User, &connection);
            let a = insert_test_transaction(&user, 1.0, TransactionType::Debit, "a", &connection);
            let b = insert_test_transaction(&user, 2.0, TransactionType::Debit, "b", &connection);
            let c = insert_test_transaction(&user, 3.0, TransactionType::Credit, "c", &connection);
            (user, a, b, c)
        };
        let state = TransactionState::from_ref(&app_state);

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user.clone()),
            Path(b.id.clone()),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Transaction deleted"));

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_user_transactions(&user.id, &connection), Ok(vec![c, a]));
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_ok() {
        let app_state = get_test_app_state(20);
        let (user, a) = {
            let connection = app_state.db_connection.lock().unwrap();
            let user = insert_test_user("Alice", Role::User, &connection);
            let a = insert_test_transaction(&user, 1.0, TransactionType::Debit, "a", &connection);
            (user, a)
        };
        let state = TransactionState::from_ref(&app_state);

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user.clone()),
            Path(TransactionId::new("missing")),
        )
        .await;

        assert_status_ok(&response);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_user_transactions(&user.id, &connection), Ok(vec![a]));
    }
}
