//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError,
    user::UserId,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No user has the email and password combination given at log-in.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A user tried to sign up with an email that belongs to another user.
    #[error("the email \"{0}\" is already in use")]
    DuplicateEmail(String),

    /// One or more required form fields were left empty.
    #[error("one or more required fields are empty")]
    MissingField,

    /// A transaction amount was zero, negative or not a number.
    ///
    /// Holds the amount as it was entered.
    ///
    /// Transactions store the direction of money in their type, so the
    /// amount itself must always be greater than zero.
    #[error("{0} is not a valid amount, the amount must be greater than zero")]
    InvalidAmount(String),

    /// A transaction was submitted without a description.
    #[error("the transaction description cannot be empty")]
    EmptyDescription,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows or when
    /// a transaction ID is missing from a user's transaction list.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A store operation referenced a user that has no transaction list.
    #[error("the user {0} has no transaction list")]
    UnknownUser(UserId),

    /// The persisted database document could not be parsed.
    ///
    /// This is not recovered from. The document has to be fixed or removed by hand.
    #[error("the stored database document is corrupt: {0}")]
    StorageCorruption(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        tracing::error!("could not parse the stored database document: {value}");
        Error::StorageCorruption(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UnknownUser(_) => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StorageCorruption(_) => InternalServerError {
                description: "Corrupt Database",
                fix: "The stored data could not be read. Check the server logs for more details.",
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                },
            ),
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing description".to_owned(),
                    details: "Enter a description for the transaction.".to_owned(),
                },
            ),
            Error::MissingField => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Please fill all fields".to_owned(),
                    details: String::new(),
                },
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: "The transaction could not be found.".to_owned(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The requested item could not be found. \
                    Try refreshing the page to see if it has been deleted."
                        .to_owned(),
                },
            ),
            Error::UnknownUser(_) => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Unknown user".to_owned(),
                    details: "Your account could not be found. Try logging in again.".to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{Error, user::UserId};

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn json_error_maps_to_storage_corruption() {
        let json_error = serde_json::from_str::<Vec<i64>>("{not json").unwrap_err();

        let error: Error = json_error.into();

        assert!(matches!(error, Error::StorageCorruption(_)));
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        for error in [
            Error::InvalidAmount("0".to_owned()),
            Error::EmptyDescription,
            Error::MissingField,
        ] {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn missing_resources_are_not_found() {
        for error in [
            Error::NotFound,
            Error::UpdateMissingTransaction,
            Error::UnknownUser(UserId::new("missing")),
        ] {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
