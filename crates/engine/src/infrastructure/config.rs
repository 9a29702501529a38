//! Engine configuration

use std::env;

use anyhow::{bail, Context, Result};

/// Which graph store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Neo4j,
    /// Volatile store for local runs without a database.
    Memory,
}

/// Engine configuration loaded from environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Neo4j connection URI
    pub neo4j_uri: String,
    /// Neo4j username
    pub neo4j_user: String,
    /// Neo4j password
    pub neo4j_password: String,

    pub store_backend: StoreBackend,

    /// HTTP bind host
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,

    /// CORS allowed origins (comma-separated, or "*" for any); empty disables CORS
    pub cors_allowed_origins: Vec<String>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_backend = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "neo4j".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "neo4j" => StoreBackend::Neo4j,
            "memory" => StoreBackend::Memory,
            other => bail!("STORE_BACKEND must be 'neo4j' or 'memory', got '{other}'"),
        };

        let neo4j_password = match store_backend {
            StoreBackend::Neo4j => lookup("NEO4J_PASSWORD")
                .context("NEO4J_PASSWORD environment variable is required")?,
            StoreBackend::Memory => lookup("NEO4J_PASSWORD").unwrap_or_default(),
        };

        Ok(Self {
            neo4j_uri: lookup("NEO4J_URI").unwrap_or_else(|| "bolt://localhost:7687".to_string()),
            neo4j_user: lookup("NEO4J_USER").unwrap_or_else(|| "neo4j".to_string()),
            neo4j_password,

            store_backend,

            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_password() {
        let config = EngineConfig::from_lookup(lookup(&[("NEO4J_PASSWORD", "secret")]))
            .expect("config");

        assert_eq!(config.store_backend, StoreBackend::Neo4j);
        assert_eq!(config.neo4j_uri, "bolt://localhost:7687");
        assert_eq!(config.server_port, 3000);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn neo4j_backend_requires_password() {
        assert!(EngineConfig::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn memory_backend_needs_no_password() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("STORE_BACKEND", "Memory"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, ,http://example.org"),
        ]))
        .expect("config");

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "http://example.org"]
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(EngineConfig::from_lookup(lookup(&[("STORE_BACKEND", "sqlite")])).is_err());
        assert!(EngineConfig::from_lookup(lookup(&[
            ("STORE_BACKEND", "memory"),
            ("SERVER_PORT", "eighty")
        ]))
        .is_err());
    }
}
