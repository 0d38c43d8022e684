//! The sign-up page for creating a new account.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of failing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthState, sign_up},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
        loading_spinner, log_in_register, password_input, text_input,
    },
    user::{NewUser, Role},
};

pub const MISSING_FIELD_ERROR_MSG: &str = "Please fill all fields";
pub const DUPLICATE_EMAIL_ERROR_MSG: &str = "Email already exists";

/// The raw data entered by the user in the sign-up form.
///
/// Fields default to empty so that a missing field is reported to the user
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl SignUpData {
    fn validate(&self) -> Result<NewUser, Error> {
        let name = self.name.trim();
        let email = self.email.trim();

        match self.role {
            Some(role) if !name.is_empty() && !email.is_empty() && !self.password.is_empty() => {
                Ok(NewUser {
                    name: name.to_owned(),
                    email: email.to_owned(),
                    password: self.password.clone(),
                    role,
                })
            }
            _ => Err(Error::MissingField),
        }
    }
}

fn role_select(selected: Role) -> Markup {
    html! {
        div
        {
            label for="role" class=(FORM_LABEL_STYLE) { "Role" }

            select name="role" id="role" required class=(FORM_TEXT_INPUT_STYLE)
            {
                @for role in [Role::User, Role::Admin] {
                    option value=(role.as_str()) selected[role == selected]
                    {
                        @match role {
                            Role::User => "User",
                            Role::Admin => "Admin",
                        }
                    }
                }
            }
        }
    }
}

fn sign_up_form(
    data: &SignUpData,
    form_error_message: Option<&str>,
    email_error_message: Option<&str>,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(error_message) = form_error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }

            (text_input("name", "Name", "text", &data.name, "Your name", None))
            (text_input("email", "Email", "email", &data.email, "name@example.com", email_error_message))
            (password_input("", None))
            (role_select(data.role.unwrap_or_default()))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Sign up"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the sign-up page.
pub async fn get_sign_up_page() -> Response {
    let sign_up_form = sign_up_form(&SignUpData::default(), None, None);
    let content = log_in_register("Create an account", &sign_up_form);
    base("Sign Up", &[], &content).into_response()
}

/// Handler for sign-up requests via the POST method.
///
/// On success the new user is logged in and redirected to the home page for
/// their role. Otherwise, the form is returned with an error message.
pub async fn post_sign_up(State(state): State<AuthState>, Form(data): Form<SignUpData>) -> Response {
    let new_user = match data.validate() {
        Ok(new_user) => new_user,
        Err(_) => return sign_up_form(&data, Some(MISSING_FIELD_ERROR_MSG), None).into_response(),
    };

    let result = match state.db_connection.lock() {
        Ok(connection) => sign_up(new_user, &connection),
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
        Err(Error::DuplicateEmail(email)) => {
            tracing::info!("Sign-up rejected, the email {email} is already in use");
            sign_up_form(&data, None, Some(DUPLICATE_EMAIL_ERROR_MSG)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not sign up user: {error}");
            sign_up_form(
                &data,
                Some("An internal error occurred. Please try again later."),
                None,
            )
            .into_response()
        }
    }
}
