//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire to match the public JSON contract.

pub mod analytics;
pub mod health;
pub mod shorten;
