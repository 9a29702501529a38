//! Neo4j database implementations.

use std::sync::Arc;

mod graph;
mod helpers;
mod rows;
mod writes;

mod award_repo;
mod identity_repo;
mod material_repo;
mod production_repo;
mod schema;
mod venue_repo;

pub use award_repo::Neo4jAwardRepo;
pub use graph::Neo4jGraph;
pub use identity_repo::Neo4jIdentityRepo;
pub use material_repo::Neo4jMaterialRepo;
pub use production_repo::Neo4jProductionRepo;
pub use schema::ensure_schema;
pub use venue_repo::Neo4jVenueRepo;

/// Create all Neo4j repositories from a graph connection.
pub struct Neo4jRepositories {
    pub identity: Arc<Neo4jIdentityRepo>,
    pub material: Arc<Neo4jMaterialRepo>,
    pub production: Arc<Neo4jProductionRepo>,
    pub venue: Arc<Neo4jVenueRepo>,
    pub award: Arc<Neo4jAwardRepo>,
}

impl Neo4jRepositories {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self {
            identity: Arc::new(Neo4jIdentityRepo::new(graph.clone())),
            material: Arc::new(Neo4jMaterialRepo::new(graph.clone())),
            production: Arc::new(Neo4jProductionRepo::new(graph.clone())),
            venue: Arc::new(Neo4jVenueRepo::new(graph.clone())),
            award: Arc::new(Neo4jAwardRepo::new(graph)),
        }
    }
}
