//! Neo4j material repository.
//!
//! A material owns its sub-material, original-version, writing-credit and
//! depiction edges. Saving clears and recreates all of them in one transaction.

use async_trait::async_trait;
use neo4rs::query;
use theatrebase_domain::{CharacterId, CreditKind, Material, MaterialId, MaterialRef};
use uuid::Uuid;

use super::helpers::{collect_rows, first_row, nullable, row_to, row_uuid, run_transaction};
use super::rows::{assemble_character_groups, assemble_credits, NamedRow};
use super::writes::{credit_queries, depiction_queries, sub_entity_queries};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{MaterialRepo, RepoError};

pub struct Neo4jMaterialRepo {
    graph: Neo4jGraph,
}

#[derive(serde::Deserialize)]
struct MaterialRow {
    name: String,
    differentiator: Option<String>,
    format: Option<String>,
    year: Option<i64>,
}

impl Neo4jMaterialRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    async fn material_refs(
        &self,
        cypher: &str,
        id: MaterialId,
        operation: &'static str,
    ) -> Result<Vec<MaterialRef>, RepoError> {
        let q = query(cypher).param("uuid", id.to_string());
        collect_rows(&self.graph, q, operation, |row| {
            Ok(row_to::<NamedRow>(row)?
                .into_named()?
                .map_id(MaterialId::from_uuid))
        })
        .await
    }

    async fn material_ids(
        &self,
        cypher: &str,
        uuid: Uuid,
        operation: &'static str,
    ) -> Result<Vec<MaterialId>, RepoError> {
        let q = query(cypher).param("uuid", uuid.to_string());
        collect_rows(&self.graph, q, operation, |row| {
            row_uuid(row).map(MaterialId::from_uuid)
        })
        .await
    }
}

#[async_trait]
impl MaterialRepo for Neo4jMaterialRepo {
    async fn get(&self, id: MaterialId) -> Result<Option<Material>, RepoError> {
        let q = query(
            "MATCH (m:Material {uuid: $uuid})
            RETURN m.name AS name, m.differentiator AS differentiator,
                m.format AS format, m.year AS year",
        )
        .param("uuid", id.to_string());

        let Some(row) = first_row(&self.graph, q, "get_material", row_to::<MaterialRow>).await?
        else {
            return Ok(None);
        };

        let mut material = Material {
            id,
            name: row.name,
            differentiator: row.differentiator.unwrap_or_default(),
            format: row.format,
            year: row.year,
            original_version: None,
            sub_materials: Vec::new(),
            writing_credits: Vec::new(),
            character_groups: Vec::new(),
        };

        material.original_version = self
            .material_refs(
                "MATCH (:Material {uuid: $uuid})-[:SUBSEQUENT_VERSION_OF]->(o:Material)
                RETURN o.uuid AS uuid, o.name AS name, o.differentiator AS differentiator",
                id,
                "get_original_version",
            )
            .await?
            .into_iter()
            .next();

        material.sub_materials = self
            .material_refs(
                "MATCH (:Material {uuid: $uuid})-[r:HAS_SUB_MATERIAL]->(s:Material)
                RETURN s.uuid AS uuid, s.name AS name, s.differentiator AS differentiator
                ORDER BY r.position",
                id,
                "get_sub_materials",
            )
            .await?;

        let q = query(
            "MATCH (:Material {uuid: $uuid})-[r:HAS_WRITING_ENTITY]->(e)
            RETURN r.creditPosition AS creditPosition, r.creditName AS creditName,
                r.entityPosition AS entityPosition, r.memberPosition AS memberPosition,
                labels(e)[0] AS label, e.uuid AS uuid, e.name AS name,
                e.differentiator AS differentiator",
        )
        .param("uuid", id.to_string());
        let rows = collect_rows(&self.graph, q, "get_writing_credits", row_to).await?;
        material.writing_credits = assemble_credits(rows)?;

        let q = query(
            "MATCH (:Material {uuid: $uuid})-[r:DEPICTS]->(c:Character)
            RETURN r.groupPosition AS groupPosition, r.groupName AS groupName,
                r.characterPosition AS characterPosition, r.displayName AS displayName,
                r.qualifier AS qualifier, c.uuid AS uuid, c.name AS name,
                c.differentiator AS differentiator",
        )
        .param("uuid", id.to_string());
        let rows = collect_rows(&self.graph, q, "get_depictions", row_to).await?;
        material.character_groups = assemble_character_groups(rows)?;

        Ok(Some(material))
    }

    async fn save(&self, material: &Material) -> Result<(), RepoError> {
        let uuid = material.id.to_uuid();

        let mut queries = vec![query(
            "MATCH (m:Material {uuid: $uuid})
            SET m.format = $format, m.year = $year
            WITH m
            OPTIONAL MATCH (m)-[r:HAS_SUB_MATERIAL|SUBSEQUENT_VERSION_OF|HAS_WRITING_ENTITY|DEPICTS]->()
            DELETE r",
        )
        .param("uuid", uuid.to_string())
        .param("format", nullable(material.format.clone()))
        .param("year", nullable(material.year))];

        if let Some(original) = &material.original_version {
            queries.push(
                query(
                    "MATCH (m:Material {uuid: $uuid}), (o:Material {uuid: $original})
                    CREATE (m)-[:SUBSEQUENT_VERSION_OF]->(o)",
                )
                .param("uuid", uuid.to_string())
                .param("original", original.id.to_string()),
            );
        }

        let subs: Vec<Uuid> = material.sub_materials.iter().map(|s| s.id.to_uuid()).collect();
        queries.extend(sub_entity_queries("Material", "HAS_SUB_MATERIAL", uuid, &subs));
        queries.extend(credit_queries(
            "Material",
            uuid,
            CreditKind::Writing,
            &material.writing_credits,
        ));
        queries.extend(depiction_queries(uuid, &material.character_groups));

        run_transaction(&self.graph, queries, "save_material").await?;
        tracing::debug!(uuid = %uuid, name = %material.name, "Saved material");
        Ok(())
    }

    async fn sur_material(&self, id: MaterialId) -> Result<Option<MaterialRef>, RepoError> {
        Ok(self
            .material_refs(
                "MATCH (sur:Material)-[:HAS_SUB_MATERIAL]->(:Material {uuid: $uuid})
                RETURN sur.uuid AS uuid, sur.name AS name, sur.differentiator AS differentiator",
                id,
                "get_sur_material",
            )
            .await?
            .into_iter()
            .next())
    }

    async fn list_subsequent_versions(
        &self,
        id: MaterialId,
    ) -> Result<Vec<MaterialId>, RepoError> {
        self.material_ids(
            "MATCH (s:Material)-[:SUBSEQUENT_VERSION_OF]->(:Material {uuid: $uuid})
            RETURN s.uuid AS uuid",
            id.to_uuid(),
            "list_subsequent_versions",
        )
        .await
    }

    async fn list_written_by(&self, entity: Uuid) -> Result<Vec<MaterialId>, RepoError> {
        self.material_ids(
            "MATCH (m:Material)-[:HAS_WRITING_ENTITY]->({uuid: $uuid})
            RETURN DISTINCT m.uuid AS uuid",
            entity,
            "list_written_by",
        )
        .await
    }

    async fn list_depicting(&self, character: CharacterId) -> Result<Vec<MaterialId>, RepoError> {
        self.material_ids(
            "MATCH (m:Material)-[:DEPICTS]->(:Character {uuid: $uuid})
            RETURN DISTINCT m.uuid AS uuid",
            character.to_uuid(),
            "list_depicting",
        )
        .await
    }
}
