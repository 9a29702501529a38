//! Theatrebase Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theatrebase_engine::api;
use theatrebase_engine::app::{App, Repositories};
use theatrebase_engine::infrastructure::{
    config::{EngineConfig, StoreBackend},
    ids::SystemUuids,
    in_memory::InMemoryGraph,
    neo4j::{ensure_schema, Neo4jGraph, Neo4jRepositories},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theatrebase_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Theatrebase Engine");

    let config = EngineConfig::from_env()?;

    let repositories = match config.store_backend {
        StoreBackend::Neo4j => {
            tracing::info!("Connecting to Neo4j at {}", config.neo4j_uri);
            let graph = Neo4jGraph::new(
                neo4rs::Graph::new(&config.neo4j_uri, &config.neo4j_user, &config.neo4j_password)
                    .await?,
            );
            ensure_schema(&graph).await?;
            Repositories::from(Neo4jRepositories::new(graph))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Repositories::in_memory(Arc::new(InMemoryGraph::new()))
        }
    };

    let app = Arc::new(App::new(repositories, Arc::new(SystemUuids::new())));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.cors_allowed_origins) {
        router = router.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(cors.allow_origin(origins))
}
