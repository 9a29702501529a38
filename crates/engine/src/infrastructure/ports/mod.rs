//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Graph access (Neo4j in production, in-memory for local runs and tests)
//! - Identifier generation (for deterministic tests)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{AwardRepo, IdentityRepo, MaterialRepo, Merged, ProductionRepo, VenueRepo};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{
    MockAwardRepo, MockIdentityRepo, MockMaterialRepo, MockProductionRepo, MockVenueRepo,
};

#[cfg(test)]
pub use testing::MockUuidPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::UuidPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
