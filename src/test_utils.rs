//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Course, tee and round factories

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db::AppState;
use crate::models::{Course, Hole, HoleResult, Round, Tee};
use crate::seed::example_holes;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// App state over a fresh in-memory database and default config
pub async fn setup_test_state() -> AppState {
  AppState {
    db: setup_test_db().await,
    config: AppConfig::default(),
  }
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Course Factories
/// ---------------------------------------------------------------------------

/// The example par-72 card: id "t1", rated 71.2 / 128
pub fn make_tee() -> Tee {
  let holes = example_holes();
  Tee {
    tee_id: "t1".to_string(),
    tee_name: "White".to_string(),
    course_rating: Some(71.2),
    slope_rating: Some(128),
    par_total: holes.iter().map(|h| h.par as u32).sum(),
    holes,
  }
}

/// An unrated tee with the given pars; stroke index follows hole order
pub fn make_tee_with_pars(tee_id: &str, pars: &[u8]) -> Tee {
  let holes: Vec<Hole> = pars
    .iter()
    .enumerate()
    .map(|(i, par)| Hole {
      hole_number: i as u8 + 1,
      par: *par,
      yardage: 0,
      stroke_index: i as u8 + 1,
    })
    .collect();

  Tee {
    tee_id: tee_id.to_string(),
    tee_name: tee_id.to_string(),
    course_rating: None,
    slope_rating: None,
    par_total: pars.iter().map(|p| *p as u32).sum(),
    holes,
  }
}

pub fn make_tee_named(tee_id: &str, tee_name: &str) -> Tee {
  Tee {
    tee_id: tee_id.to_string(),
    tee_name: tee_name.to_string(),
    ..make_tee()
  }
}

/// A course named after its id
pub fn make_course(course_id: &str, tees: Vec<Tee>) -> Course {
  Course {
    course_id: course_id.to_string(),
    name: course_id.to_string(),
    location: String::new(),
    tees,
  }
}

/// ---------------------------------------------------------------------------
/// Round Factories
/// ---------------------------------------------------------------------------

/// A round on course "c1", tee "t1" with one result per score
pub fn make_round(round_id: &str, date: &str, format: u8, scores: &[u8]) -> Round {
  make_round_on(round_id, date, "c1", "t1", format, scores)
}

pub fn make_round_on(
  round_id: &str,
  date: &str,
  course_id: &str,
  tee_id: &str,
  format: u8,
  scores: &[u8],
) -> Round {
  Round {
    round_id: round_id.to_string(),
    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid test date"),
    round_type: "course".to_string(),
    format,
    start_hole: 1,
    course_id: course_id.to_string(),
    tee_id: tee_id.to_string(),
    adjusted_gross: None,
    notes: String::new(),
    hole_results: scores
      .iter()
      .enumerate()
      .map(|(i, s)| HoleResult::scored(i as u8 + 1, *s))
      .collect(),
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'kv_store'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_factories_create_valid_data() {
    let tee = make_tee();
    assert_eq!(tee.holes.len(), 18);
    assert_eq!(tee.par_total, 72);
    assert_eq!(tee.computed_par_total(), tee.par_total);

    let round = make_round("r1", "2024-05-10", 18, &[4; 18]);
    assert_eq!(round.hole_results.len(), 18);
    assert_eq!(round.hole_results[17].hole_number, 18);
    assert_eq!(round.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
  }
}
