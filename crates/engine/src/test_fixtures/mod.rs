//! Shared helpers for use-case tests.

use std::sync::Arc;

use crate::app::Repositories;
use crate::infrastructure::in_memory::InMemoryGraph;

/// Repository ports backed by a fresh in-memory graph.
pub fn memory_repositories() -> Repositories {
    Repositories::in_memory(Arc::new(InMemoryGraph::new()))
}
