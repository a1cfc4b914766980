pub mod analysis;
pub mod commands;
pub mod config;
pub mod db;
pub mod editor;
pub mod filter;
pub mod gate;
pub mod geometry;
pub mod goal;
pub mod insights;
pub mod logging;
pub mod models;
pub mod scorebook;
pub mod seed;
pub mod store;
pub mod targets;
pub mod transfer;
pub mod window;

#[cfg(test)]
mod test_utils;

use chrono::Local;
use config::AppConfig;
use db::AppState;
use filter::FilterCriteria;
use tracing::{error, info};

/// Open the database, seed the example course on first launch and print the
/// portal report for all rounds as JSON.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = AppConfig::from_env()?;
  logging::init(config.log_format)?;

  let pool = db::initialize_db(&config.db_path).await.map_err(|e| {
    error!(error = %e, "Failed to initialize database");
    e
  })?;
  let state = AppState { db: pool, config };

  commands::courses::seed_example_course(&state).await?;

  let today = Local::now().date_naive();
  let report = commands::portal::get_portal_report(&state, FilterCriteria::default(), today).await?;
  info!(rounds = report.stats.rounds, "Portal ready");

  println!("{}", serde_json::to_string_pretty(&report)?);

  state.db.close().await;
  Ok(())
}
