//! Application layer services.
//!
//! Services consume the domain's storage traits and expose a small API to
//! the HTTP handlers and the admin CLI.
//!
//! - [`services::redirect_service::RedirectService`] - shortening, redirects and analytics

pub mod services;
