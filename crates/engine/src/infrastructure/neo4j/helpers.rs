//! Query and row helpers shared by the Neo4j repositories.

use neo4rs::{BoltNull, BoltType, Query, Row};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::RepoError;

/// Neo4j error code fragment for uniqueness constraint failures.
const CONSTRAINT_FAILED: &str = "ConstraintValidationFailed";

/// Runs a read and converts every row.
pub async fn collect_rows<T, F>(
    graph: &Neo4jGraph,
    query: Query,
    operation: &'static str,
    converter: F,
) -> Result<Vec<T>, RepoError>
where
    F: Fn(Row) -> Result<T, RepoError>,
{
    graph
        .fetch(query)
        .await
        .map_err(|e| RepoError::database(operation, e))?
        .into_iter()
        .map(converter)
        .collect()
}

/// Runs a statement and converts its first row, if any. Used for single
/// statement upserts, so key conflicts are mapped like transaction failures.
pub async fn first_row<T, F>(
    graph: &Neo4jGraph,
    query: Query,
    operation: &'static str,
    converter: F,
) -> Result<Option<T>, RepoError>
where
    F: Fn(Row) -> Result<T, RepoError>,
{
    let rows = graph
        .fetch(query)
        .await
        .map_err(|e| write_error(operation, e))?;
    rows.into_iter().next().map(converter).transpose()
}

/// Run queries in one transaction, mapping constraint failures.
pub async fn run_transaction(
    graph: &Neo4jGraph,
    queries: Vec<Query>,
    operation: &'static str,
) -> Result<(), RepoError> {
    graph
        .run_in_transaction(queries)
        .await
        .map_err(|e| write_error(operation, e))
}

/// Map a driver error, surfacing uniqueness failures as `KeyTaken`.
pub fn write_error(operation: &'static str, e: neo4rs::Error) -> RepoError {
    let message = e.to_string();
    if message.contains(CONSTRAINT_FAILED) {
        RepoError::key_taken(message)
    } else {
        RepoError::database(operation, message)
    }
}

/// Deserialize a whole row into a record whose fields match the column names.
pub fn row_to<T: DeserializeOwned>(row: Row) -> Result<T, RepoError> {
    row.to::<T>().map_err(RepoError::decode)
}

/// Read the single `uuid` column of a row.
pub fn row_uuid(row: Row) -> Result<Uuid, RepoError> {
    let value: String = row.get("uuid").map_err(RepoError::decode)?;
    parse_uuid(&value)
}

pub fn parse_uuid(value: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(value)
        .map_err(|e| RepoError::decode(format!("Invalid UUID '{value}': {e}")))
}

/// Query parameter for an optional value; `None` becomes a Cypher null.
pub fn nullable<T: Into<BoltType>>(value: Option<T>) -> BoltType {
    value.map(Into::into).unwrap_or(BoltType::Null(BoltNull))
}

/// Positions are stored as Cypher integers.
pub fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
