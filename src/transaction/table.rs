//! Table markup for listing transactions, including rows that load the next page when scrolled into view.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, edit_delete_action_links,
        format_currency, loading_spinner, transaction_type_badge,
    },
    pagination::{Page, page_url},
    timezone::format_local_datetime,
    transaction::Transaction,
};

const TABLE_STYLE: &str = "w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400";

/// The ID of the table row for `transaction`.
pub fn transaction_row_id(transaction: &Transaction) -> String {
    format!("transaction-{}", transaction.id)
}

/// The description, amount, type and date cells for `transaction`.
pub fn transaction_cells(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    html! {
        td class=(TABLE_CELL_STYLE) { (transaction.description) }
        td class="px-6 py-4 text-right" { (format_currency(transaction.amount)) }
        td class=(TABLE_CELL_STYLE) { (transaction_type_badge(transaction.type_)) }
        td class=(TABLE_CELL_STYLE)
        {
            time datetime=(transaction.created_at_utc().unix_timestamp())
            {
                (format_local_datetime(transaction.created_at_utc(), local_offset))
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, local_offset: UtcOffset, show_actions: bool) -> Markup {
    html! {
        tr id=(transaction_row_id(transaction)) class=(TABLE_ROW_STYLE)
        {
            (transaction_cells(transaction, local_offset))

            @if show_actions {
                td class="px-6 py-4 flex gap-4"
                {
                    (edit_delete_action_links(
                        &format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id),
                        &format_endpoint(endpoints::TRANSACTION, &transaction.id),
                        &format!(
                            "Are you sure you want to delete '{}'? This cannot be undone.",
                            transaction.description
                        ),
                        "closest tr",
                    ))
                }
            }
        }
    }
}

/// Render a page of rows followed by a row that requests the next page from
/// `rows_endpoint` once it is scrolled into view.
pub fn transaction_rows(
    page: &Page<'_, Transaction>,
    local_offset: UtcOffset,
    show_actions: bool,
    rows_endpoint: &str,
) -> Markup {
    let column_count = if show_actions { 5 } else { 4 };

    html! {
        @for transaction in page.items {
            (transaction_row(transaction, local_offset, show_actions))
        }

        @if let Some(next_cursor) = &page.next_cursor {
            tr
                id="load-more"
                hx-get=(page_url(rows_endpoint, next_cursor))
                hx-trigger="revealed"
                hx-swap="outerHTML"
                class=(TABLE_ROW_STYLE)
            {
                td colspan=(column_count) class="px-6 py-4 text-center"
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Loading more transactions..."
                }
            }
        }
    }
}

/// A table of transactions where `rows` is the markup from [transaction_rows].
pub fn transactions_table(rows: Markup, is_empty: bool, show_actions: bool) -> Markup {
    let column_count = if show_actions { 5 } else { 4 };

    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full"
        {
            table class=(TABLE_STYLE)
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }

                        @if show_actions {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }
                }

                tbody id="transaction-rows"
                {
                    @if is_empty {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(column_count) class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                "No transactions yet."
                            }
                        }
                    } @else {
                        (rows)
                    }
                }
            }
        }
    }
}

/// A table of the given transactions without paging or actions.
pub fn recent_transactions_table(transactions: &[Transaction], local_offset: UtcOffset) -> Markup {
    let page = Page {
        items: transactions,
        next_cursor: None,
    };

    transactions_table(
        transaction_rows(&page, local_offset, false, ""),
        transactions.is_empty(),
        false,
    )
}
