//! Defines the endpoint for updating an existing transaction.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error, endpoints,
    transaction::{
        Transaction, TransactionId, create_endpoint::TransactionState, form::TransactionForm,
        get_transaction, update_transaction,
    },
    user::User,
};

/// A route handler for updating a transaction, redirects to transactions view on success.
///
/// The transaction keeps its ID, owner and creation time.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let changes = match form.validate() {
        Ok(changes) => changes,
        Err(error) => {
            tracing::debug!("rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = get_transaction(&user.id, &transaction_id, &connection).and_then(|existing| {
        let transaction = Transaction {
            amount: changes.amount,
            type_: changes.type_,
            description: changes.description,
            ..existing
        };

        update_transaction(&user.id, &transaction, &connection)
    });

    match result {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::NotFound) => {
            tracing::error!("Could not update transaction {transaction_id}: it does not exist");
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
