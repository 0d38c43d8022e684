//! The admin dashboard with totals across all users.

use std::collections::HashMap;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    Error,
    dashboard::{
        CardTone, DashboardChart, DashboardState, RECENT_TRANSACTION_COUNT, SummaryCard,
        charts_head_elements, charts_view, expense_distribution_chart, summary_cards_view,
    },
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    timezone::must_get_local_offset,
    totals::{Totals, calculate_totals, sum_amounts},
    transaction::{Transaction, get_all_transactions, transaction_cells},
    user::{Role, UserId, count_users, get_all_users},
};

/// Everything shown on the admin dashboard.
struct AdminOverview {
    user_count: usize,
    totals: Totals,
    amounts_by_user: Vec<(String, f64)>,
    recent: Vec<Transaction>,
    user_names: HashMap<UserId, String>,
}

impl AdminOverview {
    fn load(connection: &Connection) -> Result<Self, Error> {
        let user_count = count_users(connection)?;
        let users = get_all_users(connection)?;
        let mut transactions = get_all_transactions(connection)?;

        let totals = calculate_totals(&transactions);

        let amounts_by_user = users
            .iter()
            .map(|user| {
                let owned: Vec<Transaction> = transactions
                    .iter()
                    .filter(|transaction| transaction.user_id == user.id)
                    .cloned()
                    .collect();
                (user.name.clone(), sum_amounts(&owned))
            })
            .collect();

        transactions.truncate(RECENT_TRANSACTION_COUNT);

        Ok(Self {
            user_count,
            totals,
            amounts_by_user,
            recent: transactions,
            user_names: users.into_iter().map(|user| (user.id, user.name)).collect(),
        })
    }
}

/// Display the totals across all users, the per-user distribution chart and the newest transactions.
pub async fn get_admin_dashboard_page(
    State(state): State<DashboardState>,
) -> Result<Response, Error> {
    let local_offset = must_get_local_offset(&state.local_timezone)?;

    let overview = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        AdminOverview::load(&connection)
            .inspect_err(|error| tracing::error!("could not load admin overview: {error}"))?
    };

    Ok(admin_dashboard_view(&overview, local_offset).into_response())
}

fn recent_transactions_table(overview: &AdminOverview, local_offset: UtcOffset) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "User" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    }
                }

                tbody
                {
                    @for transaction in &overview.recent {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href=(format_endpoint(endpoints::USER_DETAILS_VIEW, &transaction.user_id))
                                    class=(LINK_STYLE)
                                {
                                    @match overview.user_names.get(&transaction.user_id) {
                                        Some(name) => (name),
                                        None => "Unknown user",
                                    }
                                }
                            }

                            (transaction_cells(transaction, local_offset))
                        }
                    }

                    @if overview.recent.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No transactions yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn admin_dashboard_view(overview: &AdminOverview, local_offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADMIN_DASHBOARD_VIEW, Role::Admin).into_html();
    let charts = [DashboardChart {
        id: "expense-distribution-chart",
        options: expense_distribution_chart(&overview.amounts_by_user).to_string(),
    }];
    let cards = summary_cards_view(&[
        SummaryCard {
            title: "Total Users",
            value: overview.user_count.to_string(),
            tone: CardTone::Neutral,
        },
        SummaryCard {
            title: "Total Credits",
            value: format_currency(overview.totals.credit),
            tone: CardTone::Positive,
        },
        SummaryCard {
            title: "Total Debits",
            value: format_currency(overview.totals.debit),
            tone: CardTone::Negative,
        },
        SummaryCard {
            title: "Transaction Volume",
            value: format_currency(overview.totals.volume()),
            tone: CardTone::Neutral,
        },
    ]);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-4"
            {
                h1 class="text-2xl font-bold" { "Admin Dashboard" }

                (cards)

                (charts_view(&charts))

                section class="space-y-4"
                {
                    h2 class="text-xl font-semibold" { "Recent Transactions" }

                    (recent_transactions_table(overview, local_offset))
                }
            }
        }
    );

    base("Admin Dashboard", &charts_head_elements(&charts), &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{FromRef, State},
        response::IntoResponse,
    };
    use scraper::Selector;

    use crate::{
        dashboard::DashboardState,
        endpoints::{self, format_endpoint},
        test_utils::{
            assert_status_ok, assert_valid_html, get_test_app_state, insert_test_transaction,
            insert_test_user, parse_html_document, select_text,
        },
        transaction::TransactionType,
        user::Role,
    };

    use super::{AdminOverview, get_admin_dashboard_page};

    #[tokio::test]
    async fn shows_totals_across_users() {
        let app_state = get_test_app_state(20);
        let alice = {
            let connection = app_state.db_connection.lock().unwrap();
            insert_test_user("Admin", Role::Admin, &connection);
            let alice = insert_test_user("Alice", Role::User, &connection);
            let bob = insert_test_user("Bob", Role::User, &connection);
            insert_test_transaction(&alice, 100.0, TransactionType::Credit, "pay", &connection);
            insert_test_transaction(&bob, 40.0, TransactionType::Debit, "rent", &connection);
            insert_test_transaction(&alice, 10.0, TransactionType::Debit, "food", &connection);
            alice
        };

        let response = get_admin_dashboard_page(State(DashboardState::from_ref(&app_state)))
            .await
            .into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert_eq!(
            select_text(&html, "section h3"),
            [
                "Total Users",
                "Total Credits",
                "Total Debits",
                "Transaction Volume"
            ]
        );
        assert_eq!(
            select_text(&html, "section div p"),
            ["3", "$100.00", "$50.00", "$150.00"]
        );

        let owner_links = html
            .select(&Selector::parse("tbody tr td:first-child a").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(owner_links.len(), 3);
        let alice_url = format_endpoint(endpoints::USER_DETAILS_VIEW, &alice.id);
        assert!(
            owner_links
                .iter()
                .any(|link| link.value().attr("href") == Some(alice_url.as_str()))
        );

        let page = html.html();
        assert!(page.contains("expense-distribution-chart"));
        assert!(page.contains("Expense Distribution per User"));
    }

    #[test]
    fn distribution_includes_every_user() {
        let app_state = get_test_app_state(20);
        let connection = app_state.db_connection.lock().unwrap();
        let admin = insert_test_user("Admin", Role::Admin, &connection);
        let alice = insert_test_user("Alice", Role::User, &connection);
        insert_test_transaction(&alice, 100.0, TransactionType::Credit, "pay", &connection);
        insert_test_transaction(&alice, 10.0, TransactionType::Debit, "food", &connection);
        insert_test_transaction(&admin, 5.0, TransactionType::Debit, "coffee", &connection);

        let overview = AdminOverview::load(&connection).unwrap();

        let mut got = overview.amounts_by_user;
        got.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            got,
            [("Admin".to_owned(), 5.0), ("Alice".to_owned(), 110.0)]
        );
    }

    #[tokio::test]
    async fn empty_database_shows_zero_totals() {
        let app_state = get_test_app_state(20);

        let response = get_admin_dashboard_page(State(DashboardState::from_ref(&app_state)))
            .await
            .into_response();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_eq!(
            select_text(&html, "section div p"),
            ["0", "$0.00", "$0.00", "$0.00"]
        );
        assert!(
            select_text(&html, "tbody td")
                .iter()
                .any(|text| text == "No transactions yet.")
        );
    }
}
