//! Theatrebase Engine library.
//!
//! ## Structure
//!
//! - `use_cases/` - identity resolution, page projection and write commands
//! - `infrastructure/` - ports, configuration and the Neo4j / in-memory adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared helpers for use-case tests.
#[cfg(test)]
pub mod test_fixtures;

/// E2E integration tests using real Neo4j via testcontainers.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
