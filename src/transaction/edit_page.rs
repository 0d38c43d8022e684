//! Defines the route handler for the page for editing a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner},
    navigation::NavBar,
    transaction::{
        Transaction, TransactionId,
        create_endpoint::TransactionState,
        form::{TransactionFormDefaults, transaction_form_fields},
        get_transaction,
    },
    user::{Role, User},
};

fn edit_transaction_view(transaction: &Transaction) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW, Role::User).into_html();
    let spinner = loading_spinner();
    let fields = transaction_form_fields(&TransactionFormDefaults::from(transaction));
    let update_endpoint = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save Changes"
                }
            }
        }
    };

    base("Edit Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page for editing one of the current user's transactions.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let transaction = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transaction(&user.id, &transaction_id, &connection).inspect_err(|error| {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}")
        })?
    };

    Ok(edit_transaction_view(&transaction).into_response())
}

#[cfg(test)]
mod view_tests {
    use axum::{
        Extension,
        extract::{FromRef, Path, State},
        http::StatusCode,
        response::IntoResponse,
    };

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{
            assert_form_input_with_value, assert_form_submit_button, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, get_test_app_state, insert_test_transaction,
            insert_test_user, must_get_form, parse_html_document,
        },
        transaction::{TransactionId, TransactionType, create_endpoint::TransactionState},
        user::Role,
    };

    use super::get_edit_transaction_page;

    #[tokio::test]
    async fn render_page_with_transaction_values() {
        let app_state = get_test_app_state(20);
        let (user, transaction) = {
            let connection = app_state.db_connection.lock().unwrap();
            let user = insert_test_user("Alice", Role::User, &connection);
            let transaction =
                insert_test_transaction(&user, 12.3, TransactionType::Debit, "lunch", &connection);
            (user, transaction)
        };

        let response = get_edit_transaction_page(
            State(TransactionState::from_ref(&app_state)),
            Extension(user),
            Path(transaction.id.clone()),
        )
        .await
        .into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format_endpoint(endpoints::TRANSACTION, &transaction.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "description", "text", "lunch");
        assert_form_input_with_value(&form, "amount", "number", "12.30");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let app_state = get_test_app_state(20);
        let user = insert_test_user("Alice", Role::User, &app_state.db_connection.lock().unwrap());

        let response = get_edit_transaction_page(
            State(TransactionState::from_ref(&app_state)),
            Extension(user),
            Path(TransactionId::new("missing")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cannot_edit_another_users_transaction() {
        let app_state = get_test_app_state(20);
        let (bob, transaction) = {
            let connection = app_state.db_connection.lock().unwrap();
            let alice = insert_test_user("Alice", Role::User, &connection);
            let bob = insert_test_user("Bob", Role::User, &connection);
            let transaction =
                insert_test_transaction(&alice, 1.0, TransactionType::Debit, "secret", &connection);
            (bob, transaction)
        };

        let response = get_edit_transaction_page(
            State(TransactionState::from_ref(&app_state)),
            Extension(bob),
            Path(transaction.id),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
