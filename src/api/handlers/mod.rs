//! HTTP request handlers.
//!
//! Each handler module corresponds to one endpoint.

pub mod analytics;
pub mod analytics_list;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use analytics_list::analytics_list_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
