//! Pages for admins: an overview of every user's transactions and the details of a single user.

mod dashboard;
mod user_details;

pub use dashboard::get_admin_dashboard_page;
pub use user_details::{get_user_details_page, get_user_transaction_rows};
