// src/bin/api_server.rs

use anyhow::Context;
use product_catalog::infra::{config, telemetry};
use product_catalog::transport;
use product_catalog::PostgresProductStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init_tracing(&config::log_level(), config::log_json());

    // --- Store Initialization ---
    let database_url = config::database_url()?;
    let max_connections = config::db_max_connections()?;
    info!(max_connections, "connecting to product store");
    let store = PostgresProductStore::connect(&database_url, max_connections)
        .await
        .context("failed to initialize product store")?;
    info!("product store ready");

    let app_state = transport::http::AppState::new(Arc::new(store));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("API server listening on http://{}", bind_addr);
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!("shutdown signal received");
}
