//! Shared domain types for Recall Stack.
//!
//! This crate contains the memory log record, the create request, the recall
//! filter, plus the error and configuration types shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod memory;
