mod config;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gallery_api::http::{self, AppState, AppStateInner};
use gallery_data::MemoryStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Dataset lives for the whole process and is never written again
    let store = MemoryStore::seeded(&config.seed)?;
    let schema = gallery_api::build_schema(Arc::new(store))?;
    let state: AppState = Arc::new(AppStateInner { schema });

    let graphql_route = if config.graphiql {
        warn!("GraphiQL playground enabled on GET /graphql");
        get(http::graphiql).post(http::graphql)
    } else {
        post(http::graphql)
    };

    let app = Router::new()
        .route("/graphql", graphql_route)
        .route("/health", get(http::health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Gallery server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
