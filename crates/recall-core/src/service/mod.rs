//! Services orchestrating repository calls.

pub mod memory;
