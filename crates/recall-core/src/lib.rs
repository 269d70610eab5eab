//! Business logic and repository trait definitions for Recall Stack.
//!
//! This crate defines the "port" (repository trait) that the infrastructure
//! layer implements, and the service that assigns server-owned fields before
//! a memory log is persisted. It depends only on `recall-types` -- never on
//! `recall-infra` or any database/IO crate.

pub mod repository;
pub mod service;
