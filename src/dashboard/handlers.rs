//! The user dashboard handler and view.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    dashboard::{
        RECENT_TRANSACTION_COUNT,
        cards::{CardTone, SummaryCard, summary_cards_view},
        charts::{DashboardChart, charts_head_elements, charts_view, income_expense_chart},
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, format_currency, link},
    navigation::NavBar,
    timezone::must_get_local_offset,
    totals::{Totals, calculate_totals},
    transaction::{Transaction, get_user_transactions, recent_transactions_table},
    user::{Role, User},
};

/// The state needed for displaying the dashboard pages.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading users and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the current user's money.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let local_offset = must_get_local_offset(&state.local_timezone)?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_transactions(&user.id, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let totals = calculate_totals(&transactions);

    Ok(dashboard_view(&user, &totals, &transactions, local_offset).into_response())
}

fn user_summary_cards(totals: &Totals) -> Markup {
    summary_cards_view(&[
        SummaryCard {
            title: "Total Income",
            value: format_currency(totals.credit),
            tone: CardTone::Positive,
        },
        SummaryCard {
            title: "Total Expense",
            value: format_currency(totals.debit),
            tone: CardTone::Negative,
        },
        SummaryCard {
            title: "Current Balance",
            value: format_currency(totals.balance),
            tone: CardTone::for_amount(totals.balance),
        },
    ])
}

fn dashboard_view(
    user: &User,
    totals: &Totals,
    transactions: &[Transaction],
    local_offset: UtcOffset,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW, Role::User).into_html();
    let charts = [DashboardChart {
        id: "income-expense-chart",
        options: income_expense_chart(totals).to_string(),
    }];
    let recent = &transactions[..transactions.len().min(RECENT_TRANSACTION_COUNT)];

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-4"
            {
                h1 class="text-2xl font-bold" { "Welcome, " (user.name) }

                (user_summary_cards(totals))

                (charts_view(&charts))

                section class="space-y-4"
                {
                    div class="flex justify-between items-baseline"
                    {
                        h2 class="text-xl font-semibold" { "Recent Transactions" }
                        (link(endpoints::TRANSACTIONS_VIEW, "View all"))
                    }

                    (recent_transactions_table(recent, local_offset))
                }
            }
        }
    );

    base("Dashboard", &charts_head_elements(&charts), &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{FromRef, State},
        response::IntoResponse,
    };

    use crate::{
        dashboard::DashboardState,
        test_utils::{
            assert_status_ok, assert_valid_html, get_test_app_state, insert_test_transaction,
            insert_test_user, parse_html_document, select_text,
        },
        transaction::TransactionType,
        user::Role,
    };

    use super::get_dashboard_page;

    #[tokio::test]
    async fn shows_welcome_totals_and_recent_transactions() {
        let app_state = get_test_app_state(20);
        let user = {
            let connection = app_state.db_connection.lock().unwrap();
            let user = insert_test_user("Alice", Role::User, &connection);
            insert_test_transaction(&user, 100.0, TransactionType::Credit, "pay", &connection);
            insert_test_transaction(&user, 30.5, TransactionType::Debit, "food", &connection);
            user
        };

        let response = get_dashboard_page(State(DashboardState::from_ref(&app_state)), Extension(user))
            .await
            .into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert_eq!(select_text(&html, "h1"), ["Welcome, Alice"]);
        assert_eq!(
            select_text(&html, "section h3"),
            ["Total Income", "Total Expense", "Current Balance"]
        );
        assert_eq!(
            select_text(&html, "section div p"),
            ["$100.00", "$30.50", "$69.50"]
        );
        assert_eq!(
            select_text(&html, "tbody tr td:first-child"),
            ["food", "pay"]
        );
        assert!(html.html().contains("income-expense-chart"));
    }

    #[tokio::test]
    async fn shows_only_ten_most_recent_transactions() {
        let app_state = get_test_app_state(20);
        let user = {
            let connection = app_state.db_connection.lock().unwrap();
            let user = insert_test_user("Alice", Role::User, &connection);
            for i in 0..12 {
                insert_test_transaction(
                    &user,
                    1.0,
                    TransactionType::Debit,
                    &format!("transaction #{i}"),
                    &connection,
                );
            }
            user
        };

        let response = get_dashboard_page(State(DashboardState::from_ref(&app_state)), Extension(user))
            .await
            .into_response();

        let html = parse_html_document(response).await;
        let descriptions = select_text(&html, "tbody tr td:first-child");
        assert_eq!(descriptions.len(), 10);
        assert_eq!(descriptions[0], "transaction #11");
        assert_eq!(descriptions[9], "transaction #2");
    }
}
