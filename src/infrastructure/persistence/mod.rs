//! Link store implementations.
//!
//! - [`PgLinkStore`] - PostgreSQL via SQLx, the durable default
//! - [`RedisLinkStore`] - Redis hashes mutated by Lua scripts
//! - [`MemoryLinkStore`] - in-process map for development and tests

pub mod memory_link_store;
pub mod pg_link_store;
pub mod redis_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
pub use redis_link_store::RedisLinkStore;
