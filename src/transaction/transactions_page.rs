//! The page listing the current user's transactions and the endpoint for loading more rows.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    pagination::{PageQuery, PaginationConfig, get_page},
    timezone::must_get_local_offset,
    transaction::{
        Transaction, get_user_transactions,
        table::{transaction_rows, transactions_table},
    },
    user::{Role, User},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how many rows are sent at once.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

fn load_transactions(
    state: &TransactionsViewState,
    user: &User,
) -> Result<(Vec<Transaction>, UtcOffset), Error> {
    let local_offset = must_get_local_offset(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_user_transactions(&user.id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions for {}: {error}", user.id))?;

    Ok((transactions, local_offset))
}

fn transactions_view(table: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW, Role::User).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-screen-lg"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class={"max-w-48 text-center " (BUTTON_PRIMARY_STYLE)}
                    {
                        "Add Transaction"
                    }
                }

                (table)
            }
        }
    };

    base("Transactions", &[], &content)
}

/// Render the first page of the current user's transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let (transactions, local_offset) = load_transactions(&state, &user)?;
    let page = get_page(&transactions, None, state.pagination_config.page_size);

    let rows = transaction_rows(&page, local_offset, true, endpoints::TRANSACTION_ROWS);
    let table = transactions_table(rows, transactions.is_empty(), true);

    Ok(transactions_view(table).into_response())
}

/// Render the current user's transaction rows that come after the row named in the query.
pub async fn get_transaction_rows(
    State(state): State<TransactionsViewState>,
    Extension(user): Extension<User>,
    Query(query): Query<PageQuery>,
) -> Response {
    let (transactions, local_offset) = match load_transactions(&state, &user) {
        Ok(result) => result,
        Err(error) => return error.into_alert_response(),
    };
    let page = get_page(
        &transactions,
        query.cursor().as_ref(),
        state.pagination_config.page_size,
    );

    transaction_rows(&page, local_offset, true, endpoints::TRANSACTION_ROWS).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{FromRef, Query, State},
        response::{IntoResponse, Response},
    };
    use scraper::{Html, Selector};

    use crate::{
        endpoints,
        pagination::{PageItem, PageQuery},
        test_utils::{
            assert_status_ok, assert_valid_html, get_test_app_state, insert_test_transaction,
            insert_test_user, parse_html_document, select_text,
        },
        transaction::{Transaction, TransactionType, delete_transaction},
        user::{Role, User},
    };

    use super::{TransactionsViewState, get_transaction_rows, get_transactions_page};

    /// Returns the inserted transactions in insertion order, i.e. oldest first.
    fn setup(count: usize, page_size: usize) -> (TransactionsViewState, User, Vec<Transaction>) {
        let app_state = get_test_app_state(page_size);
        let (user, transactions) = {
            let connection = app_state.db_connection.lock().unwrap();
            let user = insert_test_user("Alice", Role::User, &connection);
            let transactions = (0..count)
                .map(|i| {
                    insert_test_transaction(
                        &user,
                        (i + 1) as f64,
                        TransactionType::Debit,
                        &format!("transaction #{i}"),
                        &connection,
                    )
                })
                .collect();
            (user, transactions)
        };

        (TransactionsViewState::from_ref(&app_state), user, transactions)
    }

    fn query_after(transaction: &Transaction) -> PageQuery {
        let cursor = transaction.cursor();

        PageQuery {
            after: Some(cursor.after),
            created_at: Some(cursor.created_at),
        }
    }

    async fn parse_rows(response: Response) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        Html::parse_fragment(&format!(
            "<table><tbody>{}</tbody></table>",
            String::from_utf8_lossy(&body)
        ))
    }

    #[tokio::test]
    async fn page_shows_newest_first_page() {
        let (state, user, transactions) = setup(3, 2);

        let response = get_transactions_page(State(state), Extension(user))
            .await
            .into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "tbody tr[id^=transaction-] td:first-child"),
            ["transaction #2", "transaction #1"]
        );

        let load_more = html
            .select(&Selector::parse("tr#load-more").unwrap())
            .next()
            .expect("want a load more row");
        let last_shown = &transactions[1];
        assert_eq!(
            load_more.value().attr("hx-get"),
            Some(
                format!(
                    "{}?after={}&created_at={}",
                    endpoints::TRANSACTION_ROWS,
                    last_shown.id,
                    last_shown.created_at
                )
                .as_str()
            )
        );
    }

    #[tokio::test]
    async fn page_has_add_transaction_link() {
        let (state, user, _) = setup(0, 2);

        let response = get_transactions_page(State(state), Extension(user))
            .await
            .into_response();

        let html = parse_html_document(response).await;
        let link = html
            .select(&Selector::parse("main a").unwrap())
            .next()
            .expect("want add transaction link");
        assert_eq!(
            link.value().attr("href"),
            Some(endpoints::NEW_TRANSACTION_VIEW)
        );
        assert!(
            select_text(&html, "tbody td")
                .iter()
                .any(|text| text == "No transactions yet.")
        );
    }

    #[tokio::test]
    async fn rows_endpoint_returns_next_page() {
        let (state, user, transactions) = setup(3, 2);

        let response = get_transaction_rows(
            State(state),
            Extension(user),
            Query(query_after(&transactions[1])),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_rows(response).await;
        assert_eq!(
            select_text(&html, "tr[id^=transaction-] td:first-child"),
            ["transaction #0"]
        );
        assert!(
            html.select(&Selector::parse("tr#load-more").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn rows_endpoint_without_cursor_returns_first_page() {
        let (state, user, _) = setup(3, 2);

        let response =
            get_transaction_rows(State(state), Extension(user), Query(PageQuery::default())).await;

        let html = parse_rows(response).await;
        assert_eq!(
            select_text(&html, "tr[id^=transaction-] td:first-child"),
            ["transaction #2", "transaction #1"]
        );
    }

    #[tokio::test]
    async fn deleting_a_shown_row_does_not_skip_the_next_page() {
        let (state, user, transactions) = setup(4, 2);
        let [a, b, c, d] = transactions.as_slice() else {
            panic!("want four transactions");
        };

        let response = get_transactions_page(State(state.clone()), Extension(user.clone()))
            .await
            .into_response();
        let html = parse_html_document(response).await;
        assert_eq!(
            select_text(&html, "tbody tr[id^=transaction-] td:first-child"),
            [d.description.as_str(), c.description.as_str()]
        );

        {
            let connection = state.db_connection.lock().unwrap();
            delete_transaction(&user.id, &d.id, &connection).unwrap();
        }

        let response =
            get_transaction_rows(State(state), Extension(user), Query(query_after(c))).await;

        assert_status_ok(&response);
        let html = parse_rows(response).await;
        assert_eq!(
            select_text(&html, "tr[id^=transaction-] td:first-child"),
            [b.description.as_str(), a.description.as_str()]
        );
    }
}
