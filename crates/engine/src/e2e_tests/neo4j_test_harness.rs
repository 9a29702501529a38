//! Throwaway Neo4j container with the schema applied and an [`App`] on top.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use neo4rs::{query, Graph};
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};

use crate::app::App;
use crate::infrastructure::ids::SystemUuids;
use crate::infrastructure::neo4j::{ensure_schema, Neo4jGraph, Neo4jRepositories};

const NEO4J_IMAGE: (&str, &str) = ("neo4j", "5.26.0-community");
const PASSWORD: &str = "theatrebase-test";
const BOLT_PORT: u16 = 7687;
const CONNECT_ATTEMPTS: u32 = 30;

pub struct Neo4jTestHarness {
    _container: ContainerAsync<GenericImage>,
    graph: Neo4jGraph,
}

impl Neo4jTestHarness {
    pub async fn start() -> anyhow::Result<Self> {
        let (name, tag) = NEO4J_IMAGE;
        let container = GenericImage::new(name, tag)
            .with_env_var("NEO4J_AUTH", format!("neo4j/{PASSWORD}"))
            .with_env_var("NEO4J_server_memory_heap_max__size", "512m")
            .with_exposed_port(BOLT_PORT)
            .with_wait_for(WaitFor::seconds(5))
            .start()
            .await;
        let uri = format!(
            "bolt://127.0.0.1:{}",
            container.get_host_port_ipv4(BOLT_PORT).await
        );

        let graph = Neo4jGraph::new(connect(&uri).await?);
        ensure_schema(&graph).await.context("apply schema")?;

        Ok(Self {
            _container: container,
            graph,
        })
    }

    pub fn app(&self) -> App {
        App::new(
            Neo4jRepositories::new(self.graph.clone()).into(),
            Arc::new(SystemUuids::new()),
        )
    }

    /// Detaches and deletes every node.
    pub async fn clean(&self) -> anyhow::Result<()> {
        self.graph
            .run(query("MATCH (n) DETACH DELETE n"))
            .await
            .context("clean database")
    }
}

/// The bolt port opens before the server accepts queries, so each attempt
/// runs a probe query. Backs off from 500ms, capped at 5s.
async fn connect(uri: &str) -> anyhow::Result<Graph> {
    let mut delay = Duration::from_millis(500);
    let mut last_error = String::new();

    for attempt in 1..=CONNECT_ATTEMPTS {
        let probe = match Graph::new(uri, "neo4j", PASSWORD).await {
            Ok(graph) => graph.run(query("RETURN 1")).await.map(|()| graph),
            Err(e) => Err(e),
        };
        match probe {
            Ok(graph) => {
                tracing::info!(attempt, uri, "Neo4j ready");
                return Ok(graph);
            }
            Err(e) => last_error = e.to_string(),
        }
        tokio::time::sleep(delay).await;
        delay = (delay * 2).min(Duration::from_secs(5));
    }

    anyhow::bail!("Neo4j at {uri} not ready after {CONNECT_ATTEMPTS} attempts: {last_error}")
}
