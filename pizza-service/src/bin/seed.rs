//! Reset the configured database to the sample restaurants and pizzas.

use pizza_service::config::PizzaConfig;
use pizza_service::services::Database;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = PizzaConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(&config.service_name, &config.log_level, None);

    let db = Database::new(&config.database.url, 1, 1)
        .await
        .map_err(|e| std::io::Error::other(format!("Database error: {}", e)))?;
    db.run_migrations()
        .await
        .map_err(|e| std::io::Error::other(format!("Migration error: {}", e)))?;
    db.seed()
        .await
        .map_err(|e| std::io::Error::other(format!("Seed error: {}", e)))?;

    tracing::info!("Seeding complete");
    Ok(())
}
