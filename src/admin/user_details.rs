//! The page an admin uses to inspect a single user and their transactions.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    Error,
    dashboard::{CardTone, SummaryCard, summary_cards_view},
    endpoints::{self, format_endpoint},
    html::{PAGE_CONTAINER_STYLE, base, format_currency, link},
    navigation::NavBar,
    pagination::{PageQuery, get_page},
    timezone::must_get_local_offset,
    totals::calculate_totals,
    transaction::{
        Transaction, TransactionsViewState, get_user_transactions, transaction_rows,
        transactions_table,
    },
    user::{Role, User, UserId, get_user_by_id},
};

fn load_user_transactions(
    state: &TransactionsViewState,
    user_id: &UserId,
) -> Result<(User, Vec<Transaction>, UtcOffset), Error> {
    let local_offset = must_get_local_offset(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_id(user_id, &connection)?;
    let transactions = get_user_transactions(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions for {user_id}: {error}"))?;

    Ok((user, transactions, local_offset))
}

/// Display a user's details, their totals and a read-only table of their transactions.
pub async fn get_user_details_page(
    State(state): State<TransactionsViewState>,
    Path(user_id): Path<UserId>,
) -> Result<Response, Error> {
    let (user, transactions, local_offset) = load_user_transactions(&state, &user_id)?;

    let rows_endpoint = format_endpoint(endpoints::USER_TRANSACTION_ROWS, &user.id);
    let page = get_page(&transactions, None, state.pagination_config.page_size);
    let rows = transaction_rows(&page, local_offset, false, &rows_endpoint);
    let table = transactions_table(rows, transactions.is_empty(), false);

    Ok(user_details_view(&user, &transactions, table).into_response())
}

/// Render a user's transaction rows that come after the row named in the query.
pub async fn get_user_transaction_rows(
    State(state): State<TransactionsViewState>,
    Path(user_id): Path<UserId>,
    Query(query): Query<PageQuery>,
) -> Response {
    let (user, transactions, local_offset) = match load_user_transactions(&state, &user_id) {
        Ok(result) => result,
        Err(error) => return error.into_alert_response(),
    };

    let rows_endpoint = format_endpoint(endpoints::USER_TRANSACTION_ROWS, &user.id);
    let page = get_page(
        &transactions,
        query.cursor().as_ref(),
        state.pagination_config.page_size,
    );

    transaction_rows(&page, local_offset, false, &rows_endpoint).into_response()
}

fn user_details_view(user: &User, transactions: &[Transaction], table: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::USER_DETAILS_VIEW, Role::Admin).into_html();
    let totals = calculate_totals(transactions);
    let cards = summary_cards_view(&[
        SummaryCard {
            title: "Total Credit",
            value: format_currency(totals.credit),
            tone: CardTone::Positive,
        },
        SummaryCard {
            title: "Total Debit",
            value: format_currency(totals.debit),
            tone: CardTone::Negative,
        },
        SummaryCard {
            title: "Balance",
            value: format_currency(totals.balance),
            tone: CardTone::for_amount(totals.balance),
        },
    ]);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg space-y-4"
            {
                header class="space-y-1"
                {
                    h1 class="text-2xl font-bold" { (user.name) }

                    dl class="text-gray-600 dark:text-gray-400"
                    {
                        div class="flex gap-2"
                        {
                            dt class="font-medium" { "Email:" }
                            dd { (user.email) }
                        }

                        div class="flex gap-2"
                        {
                            dt class="font-medium" { "Role:" }
                            dd { (user.role) }
                        }
                    }

                    p { (link(endpoints::ADMIN_DASHBOARD_VIEW, "Back to dashboard")) }
                }

                (cards)

                (table)
            }
        }
    };

    base(&user.name, &[], &content)
}
