// src/bin/api_server.rs

use anyhow::Context;
use products_api::infra::{init_tracing, AppConfig};
use products_api::transport;
use products_api::{PostgresProductRepository, ProductRepository, ProductService};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = AppConfig::from_env()?;

    // --- Database ---
    tracing::info!("Connecting to the database...");
    let repository = PostgresProductRepository::connect(&config.database_url, config.db_max_connections)
        .await
        .context("could not connect to the database")?;
    repository
        .sync()
        .await
        .context("could not create the products table")?;
    tracing::info!("Database connected, products table ready");

    let app_state = transport::http::AppState {
        products: ProductService::new(Arc::new(repository)),
    };

    // --- API Server ---
    match config.frontend_url.as_deref() {
        Some(origin) => tracing::info!("CORS restricted to {}", origin),
        None => tracing::warn!("FRONTEND_URL not set, cross-origin requests will be rejected"),
    }
    let app = transport::http::create_app(app_state, config.frontend_url.as_deref())?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;
    tracing::info!("REST API listening on http://{}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}{}",
        config.port,
        transport::http::router::SWAGGER_UI_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received (Ctrl+C)...");
}
