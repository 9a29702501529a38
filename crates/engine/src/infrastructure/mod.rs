//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod ids;
pub mod in_memory;
pub mod neo4j;
pub mod ports;
