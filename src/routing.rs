//! Application router configuration with public, user and admin route definitions.

use axum::{
    Router,
    extract::State,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, Error,
    admin::{get_admin_dashboard_page, get_user_details_page, get_user_transaction_rows},
    auth::{
        AuthState, admin_guard, admin_guard_hx, current_identity, get_log_in_page, get_log_out,
        get_sign_up_page, post_log_in, post_sign_up, user_guard, user_guard_hx,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_create_transaction_page, get_edit_transaction_page, get_transaction_rows,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::SIGN_UP_VIEW, get(get_sign_up_page))
        .route(endpoints::USERS, post(post_sign_up))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let user_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .layer(middleware::from_fn_with_state(state.clone(), user_guard));

    // HTMX requests need the HX-REDIRECT header for auth redirects to work.
    let user_routes = user_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(endpoints::TRANSACTION_ROWS, get(get_transaction_rows))
            .route(
                endpoints::TRANSACTION,
                put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), user_guard_hx)),
    );

    let admin_routes = Router::new()
        .route(endpoints::ADMIN_DASHBOARD_VIEW, get(get_admin_dashboard_page))
        .route(endpoints::USER_DETAILS_VIEW, get(get_user_details_page))
        .layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .merge(
            Router::new()
                .route(
                    endpoints::USER_TRANSACTION_ROWS,
                    get(get_user_transaction_rows),
                )
                .layer(middleware::from_fn_with_state(state.clone(), admin_guard_hx)),
        );

    user_routes
        .merge(admin_routes)
        .merge(public_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the current user's home page, or the log in page if nobody is logged in.
async fn get_index_page(State(state): State<AuthState>) -> Response {
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
        Ok(identity) => Redirect::to(identity.home_endpoint()).into_response(),
        Err(error) => error.into_response(),
    }
}
