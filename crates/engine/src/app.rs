//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    in_memory::InMemoryGraph,
    neo4j::Neo4jRepositories,
    ports::{AwardRepo, IdentityRepo, MaterialRepo, ProductionRepo, UuidPort, VenueRepo},
};
use crate::use_cases::{Management, Projector};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub projector: Projector,
    pub management: Management,
}

/// Container for all repository ports.
///
/// Every field is an `Arc<dyn PortTrait>`, so the same use cases run
/// against Neo4j or the in-memory graph.
#[derive(Clone)]
pub struct Repositories {
    pub identity: Arc<dyn IdentityRepo>,
    pub material: Arc<dyn MaterialRepo>,
    pub production: Arc<dyn ProductionRepo>,
    pub venue: Arc<dyn VenueRepo>,
    pub award: Arc<dyn AwardRepo>,
}

impl Repositories {
    /// All ports served by one shared in-memory graph.
    pub fn in_memory(graph: Arc<InMemoryGraph>) -> Self {
        Self {
            identity: graph.clone(),
            material: graph.clone(),
            production: graph.clone(),
            venue: graph.clone(),
            award: graph,
        }
    }
}

impl From<Neo4jRepositories> for Repositories {
    fn from(repos: Neo4jRepositories) -> Self {
        Self {
            identity: repos.identity,
            material: repos.material,
            production: repos.production,
            venue: repos.venue,
            award: repos.award,
        }
    }
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repositories: Repositories, uuids: Arc<dyn UuidPort>) -> Self {
        let projector = Projector::new(repositories.clone());
        let management = Management::new(repositories, uuids, projector.clone());
        Self {
            projector,
            management,
        }
    }
}
