//! Defines the route handler for the page for creating a new transaction.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, loading_spinner},
    navigation::NavBar,
    transaction::form::{TransactionFormDefaults, transaction_form_fields},
    user::Role,
};

fn create_transaction_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW, Role::User).into_html();
    let spinner = loading_spinner();
    let fields = transaction_form_fields(&TransactionFormDefaults::default());

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                (fields)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }
        }
    };

    base("New Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page for creating a transaction.
pub async fn get_create_transaction_page() -> Response {
    create_transaction_view().into_response()
}

#[cfg(test)]
mod view_tests {
    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_status_ok,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::get_create_transaction_page;

    #[tokio::test]
    async fn render_page() {
        let response = get_create_transaction_page().await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "type", "radio");
        assert_form_submit_button(&form);
    }
}
