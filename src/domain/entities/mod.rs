//! Core domain entities.
//!
//! The service has a single entity, [`LinkRecord`], mapping a short code to
//! its original URL, click counter and creation time.

pub mod link_record;

pub use link_record::{LinkRecord, sort_newest_first};
