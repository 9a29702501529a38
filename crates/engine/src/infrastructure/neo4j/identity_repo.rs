//! Keyed nodes: lookup and atomic find-or-create by (name, differentiator).

use async_trait::async_trait;
use neo4rs::query;
use theatrebase_domain::{EntityKey, Named, NodeLabel};
use uuid::Uuid;

use super::helpers::{collect_rows, first_row, parse_uuid, row_to, row_uuid};
use super::rows::NamedRow;
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{IdentityRepo, Merged, RepoError};

pub struct Neo4jIdentityRepo {
    graph: Neo4jGraph,
}

impl Neo4jIdentityRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }
}

#[derive(serde::Deserialize)]
struct MergeRow {
    uuid: String,
    created: bool,
}

#[async_trait]
impl IdentityRepo for Neo4jIdentityRepo {
    async fn get(&self, label: NodeLabel, id: Uuid) -> Result<Option<Named<Uuid>>, RepoError> {
        let q = query(&format!(
            "MATCH (n:{label} {{uuid: $uuid}})
            RETURN n.uuid AS uuid, n.name AS name, n.differentiator AS differentiator"
        ))
        .param("uuid", id.to_string());

        first_row(&self.graph, q, "get_node", |row| {
            row_to::<NamedRow>(row)?.into_named()
        })
        .await
    }

    async fn find(&self, label: NodeLabel, key: &EntityKey) -> Result<Option<Uuid>, RepoError> {
        let q = query(&format!(
            "MATCH (n:{label} {{name: $name, differentiator: $differentiator}})
            RETURN n.uuid AS uuid"
        ))
        .param("name", key.name())
        .param("differentiator", key.differentiator());

        first_row(&self.graph, q, "find_node", row_uuid).await
    }

    async fn merge(
        &self,
        label: NodeLabel,
        key: &EntityKey,
        candidate: Uuid,
    ) -> Result<Merged, RepoError> {
        let q = query(&format!(
            "MERGE (n:{label} {{name: $name, differentiator: $differentiator}})
            ON CREATE SET n.uuid = $uuid
            RETURN n.uuid AS uuid, n.uuid = $uuid AS created"
        ))
        .param("name", key.name())
        .param("differentiator", key.differentiator())
        .param("uuid", candidate.to_string());

        let merged = first_row(&self.graph, q, "merge_node", |row| {
            let row: MergeRow = row_to(row)?;
            Ok(Merged {
                id: parse_uuid(&row.uuid)?,
                created: row.created,
            })
        })
        .await;

        match merged {
            Ok(Some(merged)) => {
                if merged.created {
                    tracing::debug!(%label, key = %key, uuid = %merged.id, "Created node");
                }
                Ok(merged)
            }
            Ok(None) => Err(RepoError::database("merge_node", "MERGE returned no row")),
            // A concurrent writer created the same key between our match and create.
            Err(e) if e.is_key_taken() => match self.find(label, key).await? {
                Some(id) => Ok(Merged { id, created: false }),
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    async fn rename(&self, label: NodeLabel, id: Uuid, key: &EntityKey) -> Result<(), RepoError> {
        let q = query(&format!(
            "MATCH (n:{label} {{uuid: $uuid}})
            SET n.name = $name, n.differentiator = $differentiator
            RETURN n.uuid AS uuid"
        ))
        .param("uuid", id.to_string())
        .param("name", key.name())
        .param("differentiator", key.differentiator());

        match first_row(&self.graph, q, "rename_node", row_uuid).await? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found(label.as_str(), id)),
        }
    }

    async fn delete(&self, label: NodeLabel, id: Uuid) -> Result<bool, RepoError> {
        let q = query(&format!(
            "MATCH (n:{label} {{uuid: $uuid}})
            WITH n, n.uuid AS uuid
            DETACH DELETE n
            RETURN uuid"
        ))
        .param("uuid", id.to_string());

        let deleted = first_row(&self.graph, q, "delete_node", row_uuid)
            .await?
            .is_some();
        if deleted {
            tracing::debug!(%label, uuid = %id, "Deleted node");
        }
        Ok(deleted)
    }

    async fn list(&self, label: NodeLabel) -> Result<Vec<Named<Uuid>>, RepoError> {
        let q = query(&format!(
            "MATCH (n:{label})
            RETURN n.uuid AS uuid, n.name AS name, n.differentiator AS differentiator
            ORDER BY n.name, n.differentiator"
        ));

        collect_rows(&self.graph, q, "list_nodes", |row| {
            row_to::<NamedRow>(row)?.into_named()
        })
        .await
    }
}
