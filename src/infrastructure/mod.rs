//! Infrastructure layer.
//!
//! Implements the storage contracts defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL, Redis and in-memory link stores

pub mod persistence;
