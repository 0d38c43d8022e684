//! Authentication: who the current client is, the log-in and sign-up pages,
//! and the middleware that keeps each role on its own pages.

mod identity;
mod log_in;
mod log_out;
mod middleware;
mod sign_up;

pub use identity::{Identity, current_identity, log_in, log_out, sign_up};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, admin_guard, admin_guard_hx, user_guard, user_guard_hx};
pub use sign_up::{get_sign_up_page, post_sign_up};
