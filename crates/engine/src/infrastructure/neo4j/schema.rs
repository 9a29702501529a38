//! Neo4j schema initialization - constraints.

use neo4rs::query;
use theatrebase_domain::NodeLabel;

use crate::infrastructure::neo4j::Neo4jGraph;

/// Initialize Neo4j schema with required constraints.
///
/// Called once on startup. Constraints are created with IF NOT EXISTS so the
/// call is idempotent. The composite key constraint is what makes `MERGE` on
/// (name, differentiator) safe under concurrent writers.
pub async fn ensure_schema(graph: &Neo4jGraph) -> Result<(), neo4rs::Error> {
    for label in NodeLabel::ALL {
        let snake = label.as_str().to_ascii_lowercase();

        graph
            .run(query(&format!(
                "CREATE CONSTRAINT {snake}_key_unique IF NOT EXISTS
                 FOR (n:{label}) REQUIRE (n.name, n.differentiator) IS UNIQUE"
            )))
            .await?;

        graph
            .run(query(&format!(
                "CREATE CONSTRAINT {snake}_uuid_unique IF NOT EXISTS
                 FOR (n:{label}) REQUIRE n.uuid IS UNIQUE"
            )))
            .await?;
    }

    graph
        .run(query(
            "CREATE CONSTRAINT production_uuid_unique IF NOT EXISTS
             FOR (n:Production) REQUIRE n.uuid IS UNIQUE",
        ))
        .await?;

    graph
        .run(query(
            "CREATE CONSTRAINT award_ceremony_uuid_unique IF NOT EXISTS
             FOR (n:AwardCeremony) REQUIRE n.uuid IS UNIQUE",
        ))
        .await?;

    // Ceremonies without an award have a null awardUuid and are not constrained.
    graph
        .run(query(
            "CREATE CONSTRAINT award_ceremony_key_unique IF NOT EXISTS
             FOR (n:AwardCeremony) REQUIRE (n.awardUuid, n.name) IS UNIQUE",
        ))
        .await?;

    tracing::info!("Neo4j schema initialized (constraints ensured)");
    Ok(())
}
