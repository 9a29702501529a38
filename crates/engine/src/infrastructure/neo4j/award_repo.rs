//! Neo4j award ceremony repository.
//!
//! Graph shape:
//! `(Award)-[:PRESENTED_AT]->(AwardCeremony)-[:PRESENTS_CATEGORY {position}]->(AwardCeremonyCategory)`
//! and one `HAS_NOMINEE` edge per nominated entity, company member,
//! production or material, tagged with its nomination and slot positions.

use async_trait::async_trait;
use neo4rs::{query, Query};
use theatrebase_domain::{
    AwardCeremony, AwardCeremonyId, AwardId, CreditedEntity, Named, Nomination, NodeLabel,
};
use uuid::Uuid;

use super::helpers::{
    collect_rows, first_row, nullable, parse_uuid, position, row_to, row_uuid, run_transaction,
};
use super::rows::assemble_categories;
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{AwardRepo, RepoError};

pub struct Neo4jAwardRepo {
    graph: Neo4jGraph,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CeremonyRow {
    name: String,
    award_uuid: Option<String>,
    award_name: Option<String>,
    award_differentiator: Option<String>,
}

/// Where a nominee sits inside its nomination.
enum NomineeSlot {
    Entity(usize),
    Member { entity: usize, member: usize },
    Production(usize),
    Material(usize),
}

struct Nominee {
    label: &'static str,
    uuid: Uuid,
    slot: NomineeSlot,
}

fn nominees(nomination: &Nomination) -> Vec<Nominee> {
    let mut nominees = Vec::new();
    for (entity_index, entity) in nomination.entities.iter().enumerate() {
        let label = match entity {
            CreditedEntity::Person(_) => NodeLabel::Person,
            CreditedEntity::Company { .. } => NodeLabel::Company,
        };
        nominees.push(Nominee {
            label: label.as_str(),
            uuid: entity.uuid(),
            slot: NomineeSlot::Entity(entity_index),
        });
        for (member_index, member) in entity.members().iter().enumerate() {
            nominees.push(Nominee {
                label: NodeLabel::Person.as_str(),
                uuid: member.id.to_uuid(),
                slot: NomineeSlot::Member {
                    entity: entity_index,
                    member: member_index,
                },
            });
        }
    }
    nominees.extend(
        nomination
            .productions
            .iter()
            .enumerate()
            .map(|(index, production)| Nominee {
                label: "Production",
                uuid: production.id.to_uuid(),
                slot: NomineeSlot::Production(index),
            }),
    );
    nominees.extend(
        nomination
            .materials
            .iter()
            .enumerate()
            .map(|(index, material)| Nominee {
                label: NodeLabel::Material.as_str(),
                uuid: material.id.to_uuid(),
                slot: NomineeSlot::Material(index),
            }),
    );
    nominees
}

fn nominee_query(
    ceremony: Uuid,
    category_index: usize,
    nomination_index: usize,
    nomination: &Nomination,
    nominee: &Nominee,
) -> Query {
    let node_label = nominee.label;
    let (entity_position, member_position, production_position, material_position) =
        match nominee.slot {
            NomineeSlot::Entity(entity) => (Some(entity), None, None, None),
            NomineeSlot::Member { entity, member } => (Some(entity), Some(member), None, None),
            NomineeSlot::Production(index) => (None, None, Some(index), None),
            NomineeSlot::Material(index) => (None, None, None, Some(index)),
        };

    query(&format!(
        "MATCH (:AwardCeremony {{uuid: $ceremony}})-[:PRESENTS_CATEGORY {{position: $categoryPosition}}]->(category:AwardCeremonyCategory)
        MATCH (nominee:{node_label} {{uuid: $nominee}})
        CREATE (category)-[:HAS_NOMINEE {{
            nominationPosition: $nominationPosition,
            isWinner: $isWinner,
            customType: $customType,
            entityPosition: $entityPosition,
            memberPosition: $memberPosition,
            productionPosition: $productionPosition,
            materialPosition: $materialPosition
        }}]->(nominee)"
    ))
    .param("ceremony", ceremony.to_string())
    .param("categoryPosition", position(category_index))
    .param("nominee", nominee.uuid.to_string())
    .param("nominationPosition", position(nomination_index))
    .param("isWinner", nomination.is_winner)
    .param("customType", nullable(nomination.custom_type.clone()))
    .param("entityPosition", nullable(entity_position.map(position)))
    .param("memberPosition", nullable(member_position.map(position)))
    .param("productionPosition", nullable(production_position.map(position)))
    .param("materialPosition", nullable(material_position.map(position)))
}

impl Neo4jAwardRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    async fn ceremony_ids(
        &self,
        q: Query,
        operation: &'static str,
    ) -> Result<Vec<AwardCeremonyId>, RepoError> {
        collect_rows(&self.graph, q, operation, |row| {
            row_uuid(row).map(AwardCeremonyId::from_uuid)
        })
        .await
    }
}

#[async_trait]
impl AwardRepo for Neo4jAwardRepo {
    async fn get_ceremony(&self, id: AwardCeremonyId) -> Result<Option<AwardCeremony>, RepoError> {
        let q = query(
            "MATCH (c:AwardCeremony {uuid: $uuid})
            OPTIONAL MATCH (a:Award)-[:PRESENTED_AT]->(c)
            RETURN c.name AS name, a.uuid AS awardUuid, a.name AS awardName,
                a.differentiator AS awardDifferentiator",
        )
        .param("uuid", id.to_string());

        let Some(row) = first_row(&self.graph, q, "get_ceremony", row_to::<CeremonyRow>).await?
        else {
            return Ok(None);
        };

        let mut ceremony = AwardCeremony::new(id, row.name);
        if let (Some(uuid), Some(name)) = (row.award_uuid, row.award_name) {
            ceremony.award = Some(Named {
                id: AwardId::from_uuid(parse_uuid(&uuid)?),
                name,
                differentiator: row.award_differentiator.unwrap_or_default(),
            });
        }

        let q = query(
            "MATCH (:AwardCeremony {uuid: $uuid})-[r:PRESENTS_CATEGORY]->(category:AwardCeremonyCategory)
            RETURN r.position AS position, category.name AS name
            ORDER BY position",
        )
        .param("uuid", id.to_string());
        let categories = collect_rows(&self.graph, q, "get_categories", row_to).await?;

        let q = query(
            "MATCH (:AwardCeremony {uuid: $uuid})-[cr:PRESENTS_CATEGORY]->(:AwardCeremonyCategory)-[r:HAS_NOMINEE]->(n)
            RETURN cr.position AS categoryPosition, r.nominationPosition AS nominationPosition,
                r.isWinner AS isWinner, r.customType AS customType,
                r.entityPosition AS entityPosition, r.memberPosition AS memberPosition,
                r.productionPosition AS productionPosition, r.materialPosition AS materialPosition,
                labels(n)[0] AS label, n.uuid AS uuid, n.name AS name,
                n.differentiator AS differentiator",
        )
        .param("uuid", id.to_string());
        let nominees = collect_rows(&self.graph, q, "get_nominees", row_to).await?;

        ceremony.categories = assemble_categories(categories, nominees)?;
        Ok(Some(ceremony))
    }

    async fn save_ceremony(&self, ceremony: &AwardCeremony) -> Result<(), RepoError> {
        let uuid = ceremony.id.to_uuid();

        let mut queries = vec![
            query(
                "MERGE (c:AwardCeremony {uuid: $uuid})
                SET c.name = $name, c.awardUuid = $award
                WITH c
                OPTIONAL MATCH (c)-[:PRESENTS_CATEGORY]->(category:AwardCeremonyCategory)
                DETACH DELETE category",
            )
            .param("uuid", uuid.to_string())
            .param("name", ceremony.name.clone())
            .param(
                "award",
                nullable(ceremony.award.as_ref().map(|a| a.id.to_string())),
            ),
            query(
                "MATCH (c:AwardCeremony {uuid: $uuid})
                OPTIONAL MATCH (:Award)-[r:PRESENTED_AT]->(c)
                DELETE r",
            )
            .param("uuid", uuid.to_string()),
        ];

        if let Some(award) = &ceremony.award {
            queries.push(
                query(
                    "MATCH (a:Award {uuid: $award}), (c:AwardCeremony {uuid: $uuid})
                    CREATE (a)-[:PRESENTED_AT]->(c)",
                )
                .param("award", award.id.to_string())
                .param("uuid", uuid.to_string()),
            );
        }

        for (category_index, category) in ceremony.categories.iter().enumerate() {
            queries.push(
                query(
                    "MATCH (c:AwardCeremony {uuid: $uuid})
                    CREATE (c)-[:PRESENTS_CATEGORY {position: $position}]->(:AwardCeremonyCategory {name: $name})",
                )
                .param("uuid", uuid.to_string())
                .param("position", position(category_index))
                .param("name", category.name.clone()),
            );

            for (nomination_index, nomination) in category.nominations.iter().enumerate() {
                for nominee in nominees(nomination) {
                    queries.push(nominee_query(
                        uuid,
                        category_index,
                        nomination_index,
                        nomination,
                        &nominee,
                    ));
                }
            }
        }

        run_transaction(&self.graph, queries, "save_ceremony").await?;
        tracing::debug!(uuid = %uuid, name = %ceremony.name, "Saved award ceremony");
        Ok(())
    }

    async fn delete_ceremony(&self, id: AwardCeremonyId) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (c:AwardCeremony {uuid: $uuid})
            OPTIONAL MATCH (c)-[:PRESENTS_CATEGORY]->(category:AwardCeremonyCategory)
            WITH c, c.uuid AS uuid, collect(category) AS categories
            FOREACH (category IN categories | DETACH DELETE category)
            DETACH DELETE c
            RETURN uuid",
        )
        .param("uuid", id.to_string());

        Ok(first_row(&self.graph, q, "delete_ceremony", row_uuid)
            .await?
            .is_some())
    }

    async fn find_ceremony(
        &self,
        award: AwardId,
        name: &str,
    ) -> Result<Option<AwardCeremonyId>, RepoError> {
        let q = query(
            "MATCH (:Award {uuid: $award})-[:PRESENTED_AT]->(c:AwardCeremony {name: $name})
            RETURN c.uuid AS uuid",
        )
        .param("award", award.to_string())
        .param("name", name);

        Ok(self
            .ceremony_ids(q, "find_ceremony")
            .await?
            .into_iter()
            .next())
    }

    async fn list_ceremonies(&self) -> Result<Vec<AwardCeremonyId>, RepoError> {
        self.ceremony_ids(
            query("MATCH (c:AwardCeremony) RETURN c.uuid AS uuid"),
            "list_ceremonies",
        )
        .await
    }

    async fn list_ceremonies_of_award(
        &self,
        award: AwardId,
    ) -> Result<Vec<AwardCeremonyId>, RepoError> {
        let q = query(
            "MATCH (:Award {uuid: $award})-[:PRESENTED_AT]->(c:AwardCeremony)
            RETURN c.uuid AS uuid",
        )
        .param("award", award.to_string());
        self.ceremony_ids(q, "list_ceremonies_of_award").await
    }

    async fn list_ceremonies_nominating(
        &self,
        uuids: Vec<Uuid>,
    ) -> Result<Vec<AwardCeremonyId>, RepoError> {
        let uuids: Vec<String> = uuids.iter().map(Uuid::to_string).collect();
        let q = query(
            "MATCH (c:AwardCeremony)-[:PRESENTS_CATEGORY]->(:AwardCeremonyCategory)-[:HAS_NOMINEE]->(n)
            WHERE n.uuid IN $uuids
            RETURN DISTINCT c.uuid AS uuid",
        )
        .param("uuids", uuids);
        self.ceremony_ids(q, "list_ceremonies_nominating").await
    }
}
