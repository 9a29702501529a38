//! End-to-end tests against a real Neo4j (via testcontainers).
//!
//! ```bash
//! cargo test -p theatrebase-engine --lib e2e_tests -- --ignored --test-threads=1
//! ```

mod catalogue_tests;
mod neo4j_test_harness;

pub use neo4j_test_harness::Neo4jTestHarness;
