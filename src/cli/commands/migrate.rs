use anyhow::Context;

use crate::config::AppConfig;
use crate::database::Database;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to DATABASE_URL")?;

    db.ensure_schema().await.context("failed to create schema")?;
    db.close().await;
    println!("Schema is up to date");
    Ok(())
}
