use anyhow::Context;
use products_api::infra::{init_tracing, AppConfig};
use products_api::{PostgresProductRepository, ProductRepository};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Checks that the API can start: reads the configuration, connects to Postgres,\n\
         creates the products table if missing and counts its rows.\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           PORT, FRONTEND_URL, DB_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = AppConfig::from_env()?;
    tracing::info!("Preflight:");
    tracing::info!("  PORT={}", config.port);
    tracing::info!(
        "  FRONTEND_URL={}",
        config.frontend_url.as_deref().unwrap_or("<any origin>")
    );
    tracing::info!("  DB_MAX_CONNECTIONS={}", config.db_max_connections);

    let repository = PostgresProductRepository::connect(&config.database_url, config.db_max_connections)
        .await
        .context("could not connect to DATABASE_URL")?;
    repository.ping().await.context("database did not answer a ping")?;
    tracing::info!("  Database reachable.");

    repository
        .sync()
        .await
        .context("could not create the products table")?;
    let count = repository.count().await?;
    tracing::info!("  products table ready ({} rows).", count);

    tracing::info!("Preflight OK.");
    Ok(())
}
