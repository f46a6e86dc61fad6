use bonifica_pro::config::catalog::{load_default_config, seed_catalog};
use bonifica_pro::config::database::{create_connection, create_tables};
use bonifica_pro::core::wallet;
use bonifica_pro::errors::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing as early as possible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // .env is optional, env vars can be set externally
    dotenv().ok();

    let db = create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    let catalog = load_default_config()
        .inspect_err(|e| error!("Failed to load catalog config: {e}"))?;
    seed_catalog(&db, &catalog)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {e}"))?;

    let balance = wallet::balance(&db).await?;
    info!(balance, "BonificaPro rules engine ready.");

    Ok(())
}
