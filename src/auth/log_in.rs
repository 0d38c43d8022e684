//! This file defines the routes for displaying the log-in page and handling log-in requests.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthState, log_in},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, LINK_STYLE, base, loading_spinner, log_in_register, password_input,
        text_input,
    },
};

/// The message shown for any email and password combination that does not match a user.
pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Invalid credentials";

fn log_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            (text_input("email", "Email", "email", email, "name@example.com", None))
            (password_input("", error_message))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Don't have an account? "
                a href=(endpoints::SIGN_UP_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Sign up here"
                }
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    let log_in_form = log_in_form("", None);
    let content = log_in_register("Log in to your account", &log_in_form);
    base("Log In", &[], &content).into_response()
}

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session is started and the client is
/// redirected to the home page for the user's role. Otherwise, the form is
/// returned with an error message explaining the problem.
pub async fn post_log_in(State(state): State<AuthState>, Form(data): Form<LogInData>) -> Response {
    let result = match state.db_connection.lock() {
        Ok(connection) => log_in(&data.email, &data.password, &connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            Err(Error::DatabaseLockError)
        }
    };

    match result {
        Ok(user) => (
            HxRedirect(user.role.home_endpoint().to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::InvalidCredentials) => {
            tracing::info!("Failed log-in attempt for {}", data.email);
            log_in_form(&data.email, Some(INVALID_CREDENTIALS_ERROR_MSG)).into_response()
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            log_in_form(
                &data.email,
                Some("An internal error occurred. Please try again later."),
            )
            .into_response()
        }
    }
}
