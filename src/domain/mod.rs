//! Domain layer: entities, errors and storage contracts.
//!
//! - [`entities`] - the [`entities::LinkRecord`] data model
//! - [`repositories`] - the [`repositories::LinkStore`] trait
//! - [`error`] - the [`error::LinkError`] taxonomy
//!
//! The domain layer has no dependency on HTTP or on a concrete database.

pub mod entities;
pub mod error;
pub mod repositories;
