//! Authentication middleware that checks the session and the user's role, and handles redirects.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::{Identity, current_identity},
    endpoints,
    user::Role,
};

/// The state needed for the auth middleware and the log-in, sign-up and log-out handlers.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The database connection holding the users and the session.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that checks that the session belongs to a user with `required_role`.
/// The [User](crate::user::User) is placed into the request and then the request executed
/// normally if so, otherwise a redirect to the log-in page is returned using `get_redirect`.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<User>` to receive the user.
#[inline]
async fn auth_guard_internal(
    state: AuthState,
    required_role: Role,
    mut request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let identity = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        current_identity(&connection)
    };

    match identity {
        Ok(Identity::Authenticated(user)) if user.role == required_role => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(Identity::Authenticated(user)) => {
            tracing::warn!(
                "User {} with role {} tried to access {} which requires role {required_role}",
                user.id,
                user.role,
                request.uri().path()
            );
            get_redirect(endpoints::LOG_IN_VIEW)
        }
        Ok(Identity::Anonymous) => get_redirect(endpoints::LOG_IN_VIEW),
        Err(error) => {
            tracing::error!("could not get the current user: {error}");
            error.into_response()
        }
    }
}

fn redirect(redirect_url: &str) -> Response {
    Redirect::to(redirect_url).into_response()
}

fn hx_redirect(redirect_url: &str) -> Response {
    (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
}

/// Middleware for pages that only users may see. Redirects everyone else to the log-in page.
pub async fn user_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, Role::User, request, next, redirect).await
}

/// Middleware for htmx endpoints that only users may call. Responds with a HTMX redirect to the log-in page for everyone else.
pub async fn user_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, Role::User, request, next, hx_redirect).await
}

/// Middleware for pages that only admins may see. Redirects everyone else to the log-in page.
pub async fn admin_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, Role::Admin, request, next, redirect).await
}

/// Middleware for htmx endpoints that only admins may call. Responds with a HTMX redirect to the log-in page for everyone else.
pub async fn admin_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, Role::Admin, request, next, hx_redirect).await
}
