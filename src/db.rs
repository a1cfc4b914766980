use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;

pub type DbPool = SqlitePool;

/// Application state holding the database connection pool and configuration
pub struct AppState {
  pub db: DbPool,
  pub config: AppConfig,
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(db_path: &Path) -> Result<DbPool, Box<dyn std::error::Error + Send + Sync>> {
  // Create the parent directory if it doesn't exist
  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
  info!(path = %db_path.display(), "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_initialize_db_creates_file_and_schema() {
    let dir = std::env::temp_dir().join(format!("golf-tracker-test-{}", uuid::Uuid::new_v4().simple()));
    let path = dir.join("nested").join("tracker.db");

    let pool = initialize_db(&path).await.expect("Should initialize");
    assert!(path.exists());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
      .fetch_one(&pool)
      .await
      .expect("kv_store should exist");
    assert_eq!(count, 0);

    pool.close().await;
    let _ = fs::remove_dir_all(dir);
  }
}
