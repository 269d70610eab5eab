//! Infrastructure layer for Recall Stack.
//!
//! Contains the SQLite implementation of the repository trait defined in
//! `recall-core` (schema management, recall query building, the memory log
//! repository) and the TOML config loader.

pub mod config;
pub mod sqlite;
