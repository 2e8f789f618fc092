//! HTTP request handlers for the account service.

pub mod account_handler;
pub mod health;
pub mod metrics;

pub use account_handler::{
    handle_delete_user, handle_list_users, handle_login, handle_signup, handle_test,
};
pub use health::health_check;
pub use metrics::metrics_handler;
