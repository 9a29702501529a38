//! Neo4j production repository.
//!
//! Productions are identified by uuid alone. Dates are stored as ISO
//! `YYYY-MM-DD` strings.

use async_trait::async_trait;
use neo4rs::query;
use theatrebase_domain::common::{format_date, parse_optional_date};
use theatrebase_domain::{
    CreditKind, MaterialId, Named, PersonId, Production, ProductionId, ProductionRef, VenueId,
};
use uuid::Uuid;

use super::helpers::{
    collect_rows, first_row, nullable, parse_uuid, row_to, row_uuid, run_transaction,
};
use super::rows::{assemble_cast, assemble_credits, NamedRow};
use super::writes::{cast_queries, credit_queries, sub_entity_queries};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{ProductionRepo, RepoError};

const PRODUCTION_CREDIT_KINDS: [CreditKind; 3] =
    [CreditKind::Producer, CreditKind::Creative, CreditKind::Crew];

pub struct Neo4jProductionRepo {
    graph: Neo4jGraph,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductionRow {
    name: String,
    start_date: Option<String>,
    press_date: Option<String>,
    end_date: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProductionRefRow {
    uuid: String,
    name: String,
}

impl ProductionRefRow {
    fn into_ref(self) -> Result<ProductionRef, RepoError> {
        Ok(ProductionRef {
            id: ProductionId::from_uuid(parse_uuid(&self.uuid)?),
            name: self.name,
        })
    }
}

impl Neo4jProductionRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    async fn production_ids(
        &self,
        cypher: &str,
        uuid: Uuid,
        operation: &'static str,
    ) -> Result<Vec<ProductionId>, RepoError> {
        let q = query(cypher).param("uuid", uuid.to_string());
        collect_rows(&self.graph, q, operation, |row| {
            row_uuid(row).map(ProductionId::from_uuid)
        })
        .await
    }

    async fn named_neighbour(
        &self,
        cypher: &str,
        id: ProductionId,
        operation: &'static str,
    ) -> Result<Option<Named<Uuid>>, RepoError> {
        let q = query(cypher).param("uuid", id.to_string());
        first_row(&self.graph, q, operation, |row| {
            row_to::<NamedRow>(row)?.into_named()
        })
        .await
    }
}

fn parse_stored_date(value: Option<String>) -> Result<Option<chrono::NaiveDate>, RepoError> {
    parse_optional_date(value.as_deref()).map_err(RepoError::decode)
}

#[async_trait]
impl ProductionRepo for Neo4jProductionRepo {
    async fn get(&self, id: ProductionId) -> Result<Option<Production>, RepoError> {
        let q = query(
            "MATCH (p:Production {uuid: $uuid})
            RETURN p.name AS name, p.startDate AS startDate, p.pressDate AS pressDate,
                p.endDate AS endDate",
        )
        .param("uuid", id.to_string());

        let Some(row) =
            first_row(&self.graph, q, "get_production", row_to::<ProductionRow>).await?
        else {
            return Ok(None);
        };

        let mut production = Production::new(id, row.name);
        production.start_date = parse_stored_date(row.start_date)?;
        production.press_date = parse_stored_date(row.press_date)?;
        production.end_date = parse_stored_date(row.end_date)?;

        production.material = self
            .named_neighbour(
                "MATCH (:Production {uuid: $uuid})-[:PRODUCTION_OF]->(m:Material)
                RETURN m.uuid AS uuid, m.name AS name, m.differentiator AS differentiator",
                id,
                "get_production_material",
            )
            .await?
            .map(|named| named.map_id(MaterialId::from_uuid));

        production.venue = self
            .named_neighbour(
                "MATCH (:Production {uuid: $uuid})-[:PLAYS_AT]->(v:Venue)
                RETURN v.uuid AS uuid, v.name AS name, v.differentiator AS differentiator",
                id,
                "get_production_venue",
            )
            .await?
            .map(|named| named.map_id(VenueId::from_uuid));

        let q = query(
            "MATCH (:Production {uuid: $uuid})-[r:HAS_SUB_PRODUCTION]->(s:Production)
            RETURN s.uuid AS uuid, s.name AS name
            ORDER BY r.position",
        )
        .param("uuid", id.to_string());
        production.sub_productions = collect_rows(&self.graph, q, "get_sub_productions", |row| {
            row_to::<ProductionRefRow>(row)?.into_ref()
        })
        .await?;

        for kind in PRODUCTION_CREDIT_KINDS {
            let q = query(&format!(
                "MATCH (:Production {{uuid: $uuid}})-[r:{}]->(e)
                RETURN r.creditPosition AS creditPosition, r.creditName AS creditName,
                    r.entityPosition AS entityPosition, r.memberPosition AS memberPosition,
                    labels(e)[0] AS label, e.uuid AS uuid, e.name AS name,
                    e.differentiator AS differentiator",
                kind.relationship()
            ))
            .param("uuid", id.to_string());
            let credits = assemble_credits(
                collect_rows(&self.graph, q, "get_production_credits", row_to).await?,
            )?;
            match kind {
                CreditKind::Producer => production.producer_credits = credits,
                CreditKind::Creative => production.creative_credits = credits,
                CreditKind::Crew => production.crew_credits = credits,
                CreditKind::Writing => {}
            }
        }

        let q = query(
            "MATCH (:Production {uuid: $uuid})-[r:HAS_CAST_MEMBER]->(person:Person)
            RETURN r.castMemberPosition AS castMemberPosition, r.rolePosition AS rolePosition,
                r.roleName AS roleName, r.characterName AS characterName,
                r.characterDifferentiator AS characterDifferentiator, r.qualifier AS qualifier,
                r.isAlternate AS isAlternate, person.uuid AS uuid, person.name AS name,
                person.differentiator AS differentiator",
        )
        .param("uuid", id.to_string());
        production.cast = assemble_cast(collect_rows(&self.graph, q, "get_cast", row_to).await?)?;

        Ok(Some(production))
    }

    async fn save(&self, production: &Production) -> Result<(), RepoError> {
        let uuid = production.id.to_uuid();

        let mut queries = vec![query(
            "MERGE (p:Production {uuid: $uuid})
            SET p.name = $name,
                p.startDate = $startDate,
                p.pressDate = $pressDate,
                p.endDate = $endDate
            WITH p
            OPTIONAL MATCH (p)-[r:PRODUCTION_OF|PLAYS_AT|HAS_SUB_PRODUCTION|HAS_PRODUCER_ENTITY|HAS_CREATIVE_ENTITY|HAS_CREW_ENTITY|HAS_CAST_MEMBER]->()
            DELETE r",
        )
        .param("uuid", uuid.to_string())
        .param("name", production.name.clone())
        .param("startDate", nullable(production.start_date.map(format_date)))
        .param("pressDate", nullable(production.press_date.map(format_date)))
        .param("endDate", nullable(production.end_date.map(format_date)))];

        if let Some(material) = &production.material {
            queries.push(
                query(
                    "MATCH (p:Production {uuid: $uuid}), (m:Material {uuid: $material})
                    CREATE (p)-[:PRODUCTION_OF]->(m)",
                )
                .param("uuid", uuid.to_string())
                .param("material", material.id.to_string()),
            );
        }

        if let Some(venue) = &production.venue {
            queries.push(
                query(
                    "MATCH (p:Production {uuid: $uuid}), (v:Venue {uuid: $venue})
                    CREATE (p)-[:PLAYS_AT]->(v)",
                )
                .param("uuid", uuid.to_string())
                .param("venue", venue.id.to_string()),
            );
        }

        let subs: Vec<Uuid> = production
            .sub_productions
            .iter()
            .map(|s| s.id.to_uuid())
            .collect();
        queries.extend(sub_entity_queries(
            "Production",
            "HAS_SUB_PRODUCTION",
            uuid,
            &subs,
        ));
        for kind in PRODUCTION_CREDIT_KINDS {
            queries.extend(credit_queries(
                "Production",
                uuid,
                kind,
                production.credits(kind),
            ));
        }
        queries.extend(cast_queries(uuid, &production.cast));

        run_transaction(&self.graph, queries, "save_production").await?;
        tracing::debug!(uuid = %uuid, name = %production.name, "Saved production");
        Ok(())
    }

    async fn delete(&self, id: ProductionId) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (p:Production {uuid: $uuid})
            WITH p, p.uuid AS uuid
            DETACH DELETE p
            RETURN uuid",
        )
        .param("uuid", id.to_string());

        Ok(first_row(&self.graph, q, "delete_production", row_uuid)
            .await?
            .is_some())
    }

    async fn sur_production(&self, id: ProductionId) -> Result<Option<ProductionRef>, RepoError> {
        let q = query(
            "MATCH (sur:Production)-[:HAS_SUB_PRODUCTION]->(:Production {uuid: $uuid})
            RETURN sur.uuid AS uuid, sur.name AS name",
        )
        .param("uuid", id.to_string());

        first_row(&self.graph, q, "get_sur_production", |row| {
            row_to::<ProductionRefRow>(row)?.into_ref()
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<ProductionId>, RepoError> {
        let q = query("MATCH (p:Production) RETURN p.uuid AS uuid");
        collect_rows(&self.graph, q, "list_productions", |row| {
            row_uuid(row).map(ProductionId::from_uuid)
        })
        .await
    }

    async fn list_of_material(&self, material: MaterialId) -> Result<Vec<ProductionId>, RepoError> {
        self.production_ids(
            "MATCH (p:Production)-[:PRODUCTION_OF]->(:Material {uuid: $uuid})
            RETURN p.uuid AS uuid",
            material.to_uuid(),
            "list_productions_of_material",
        )
        .await
    }

    async fn list_at_venue(&self, venue: VenueId) -> Result<Vec<ProductionId>, RepoError> {
        self.production_ids(
            "MATCH (p:Production)-[:PLAYS_AT]->(:Venue {uuid: $uuid})
            RETURN p.uuid AS uuid",
            venue.to_uuid(),
            "list_productions_at_venue",
        )
        .await
    }

    async fn list_credited(
        &self,
        entity: Uuid,
        kind: CreditKind,
    ) -> Result<Vec<ProductionId>, RepoError> {
        if kind == CreditKind::Writing {
            return Ok(Vec::new());
        }
        self.production_ids(
            &format!(
                "MATCH (p:Production)-[:{}]->({{uuid: $uuid}})
                RETURN DISTINCT p.uuid AS uuid",
                kind.relationship()
            ),
            entity,
            "list_credited_productions",
        )
        .await
    }

    async fn list_with_cast_member(
        &self,
        person: PersonId,
    ) -> Result<Vec<ProductionId>, RepoError> {
        self.production_ids(
            "MATCH (p:Production)-[:HAS_CAST_MEMBER]->(:Person {uuid: $uuid})
            RETURN DISTINCT p.uuid AS uuid",
            person.to_uuid(),
            "list_cast_member_productions",
        )
        .await
    }
}
