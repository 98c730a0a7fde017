//! Seed command - Loads the product catalog.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let inserted = db.seed().await?;
    if inserted == 0 {
        tracing::info!("Product catalog already present, nothing to seed");
    }

    Ok(())
}
