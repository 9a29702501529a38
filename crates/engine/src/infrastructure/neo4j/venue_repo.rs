//! Neo4j venue repository.

use async_trait::async_trait;
use neo4rs::query;
use theatrebase_domain::{Venue, VenueId, VenueRef};
use uuid::Uuid;

use super::helpers::{collect_rows, first_row, row_to, run_transaction};
use super::rows::NamedRow;
use super::writes::sub_entity_queries;
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{RepoError, VenueRepo};

pub struct Neo4jVenueRepo {
    graph: Neo4jGraph,
}

impl Neo4jVenueRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }
}

fn venue_ref(row: neo4rs::Row) -> Result<VenueRef, RepoError> {
    Ok(row_to::<NamedRow>(row)?
        .into_named()?
        .map_id(VenueId::from_uuid))
}

#[async_trait]
impl VenueRepo for Neo4jVenueRepo {
    async fn get(&self, id: VenueId) -> Result<Option<Venue>, RepoError> {
        let q = query(
            "MATCH (v:Venue {uuid: $uuid})
            RETURN v.uuid AS uuid, v.name AS name, v.differentiator AS differentiator",
        )
        .param("uuid", id.to_string());

        let Some(node) = first_row(&self.graph, q, "get_venue", venue_ref).await? else {
            return Ok(None);
        };

        let q = query(
            "MATCH (:Venue {uuid: $uuid})-[r:HAS_SUB_VENUE]->(s:Venue)
            RETURN s.uuid AS uuid, s.name AS name, s.differentiator AS differentiator
            ORDER BY r.position",
        )
        .param("uuid", id.to_string());

        Ok(Some(Venue {
            id,
            name: node.name,
            differentiator: node.differentiator,
            sub_venues: collect_rows(&self.graph, q, "get_sub_venues", venue_ref).await?,
        }))
    }

    async fn save(&self, venue: &Venue) -> Result<(), RepoError> {
        let uuid = venue.id.to_uuid();
        let mut queries = vec![query(
            "MATCH (v:Venue {uuid: $uuid})
            OPTIONAL MATCH (v)-[r:HAS_SUB_VENUE]->()
            DELETE r",
        )
        .param("uuid", uuid.to_string())];

        let subs: Vec<Uuid> = venue.sub_venues.iter().map(|s| s.id.to_uuid()).collect();
        queries.extend(sub_entity_queries("Venue", "HAS_SUB_VENUE", uuid, &subs));

        run_transaction(&self.graph, queries, "save_venue").await?;
        tracing::debug!(uuid = %uuid, name = %venue.name, "Saved venue");
        Ok(())
    }

    async fn sur_venue(&self, id: VenueId) -> Result<Option<VenueRef>, RepoError> {
        let q = query(
            "MATCH (sur:Venue)-[:HAS_SUB_VENUE]->(:Venue {uuid: $uuid})
            RETURN sur.uuid AS uuid, sur.name AS name, sur.differentiator AS differentiator",
        )
        .param("uuid", id.to_string());

        first_row(&self.graph, q, "get_sur_venue", venue_ref).await
    }
}
