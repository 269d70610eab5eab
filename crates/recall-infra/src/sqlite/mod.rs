//! SQLite storage layer.
//!
//! Repository implementation backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod memory_log;
pub mod pool;
pub mod recall_query;
pub mod schema;
