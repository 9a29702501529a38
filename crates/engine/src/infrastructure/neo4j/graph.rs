//! Timed access to the Neo4j driver.

use std::time::Instant;

use futures_util::TryStreamExt;
use neo4rs::{Graph, Query, Row};

/// Shared driver handle. Each round trip is logged at trace level under the
/// `neo4j` target with its elapsed time.
#[derive(Clone)]
pub struct Neo4jGraph {
    inner: Graph,
}

impl Neo4jGraph {
    pub fn new(graph: Graph) -> Self {
        Self { inner: graph }
    }

    pub fn inner(&self) -> &Graph {
        &self.inner
    }

    fn timed<T>(&self, kind: &'static str, started: Instant, result: &Result<T, neo4rs::Error>) {
        tracing::trace!(
            target: "neo4j",
            kind,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "round trip"
        );
    }

    /// Runs a statement whose result rows are not needed.
    pub async fn run(&self, query: Query) -> Result<(), neo4rs::Error> {
        let started = Instant::now();
        let result = self.inner.run(query).await;
        self.timed("run", started, &result);
        result
    }

    /// Runs a read and buffers every row. Result sets here are one page of
    /// one subject, so buffering keeps callers free of stream lifetimes.
    pub async fn fetch(&self, query: Query) -> Result<Vec<Row>, neo4rs::Error> {
        let started = Instant::now();
        let result = match self.inner.execute(query).await {
            Ok(rows) => rows.into_stream().try_collect::<Vec<Row>>().await,
            Err(e) => Err(e),
        };
        self.timed("fetch", started, &result);
        result
    }

    /// Applies every statement or none of them.
    pub async fn run_in_transaction(&self, queries: Vec<Query>) -> Result<(), neo4rs::Error> {
        let started = Instant::now();
        let mut txn = self.inner.start_txn().await?;
        let result = match txn.run_queries(queries).await {
            Ok(()) => txn.commit().await,
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    tracing::warn!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        };
        self.timed("transaction", started, &result);
        result
    }
}
