//! The dashboards that summarise transactions with cards, charts and a table of recent transactions.

mod cards;
mod charts;
mod handlers;

pub(crate) use cards::{CardTone, SummaryCard, summary_cards_view};
pub(crate) use charts::{
    DashboardChart, charts_head_elements, charts_view, expense_distribution_chart,
};
pub use handlers::{DashboardState, get_dashboard_page};

/// How many of the newest transactions the dashboards list.
pub const RECENT_TRANSACTION_COUNT: usize = 10;
