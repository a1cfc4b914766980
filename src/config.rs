//! Runtime configuration and the engine's tunable thresholds

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::logging::LogFormat;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DB_PATH_VAR: &str = "GOLF_TRACKER_DB";
const PASSWORD_VAR: &str = "GOLF_TRACKER_PASSWORD_SHA256";
const THRESHOLDS_VAR: &str = "GOLF_TRACKER_THRESHOLDS";
const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
const DEFAULT_DB_PATH: &str = "golf-tracker.db";

/// ---------------------------------------------------------------------------
/// Engine Thresholds
/// ---------------------------------------------------------------------------

/// Every cut-off the insight, target and goal heuristics use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineThresholds {
  /// Rounds needed before insights are produced
  pub insight_min_rounds: usize,
  /// Size of the recent and prior insight windows
  pub insight_window: usize,
  /// Most insights returned
  pub max_insights: usize,
  /// Hard-minus-easy SI gap above which hard holes are flagged (strict >)
  pub difficulty_gap: f64,
  /// Scored holes a round needs to join the fatigue check
  pub fatigue_min_holes: usize,
  /// Second-half drift beyond which fatigue is reported (strict > / <)
  pub fatigue_drift: f64,
  /// Average penalty strokes per round that flags penalties (>=)
  pub penalty_burden: f64,
  /// Rounds the next-round targets look back over
  pub target_window: usize,
  /// Average blow-ups per round that triggers the "cut doubles" target (>=)
  pub blowup_target: f64,
  /// Average volatility that triggers the "stabilise" target (>=)
  pub volatility_target: f64,
  /// Rounds a goal window needs before a baseline or progress exists
  pub goal_min_rounds: usize,
}

impl Default for EngineThresholds {
  fn default() -> Self {
    Self {
      insight_min_rounds: 3,
      insight_window: 10,
      max_insights: 4,
      difficulty_gap: 0.6,
      fatigue_min_holes: 6,
      fatigue_drift: 0.4,
      penalty_burden: 2.0,
      target_window: 6,
      blowup_target: 3.0,
      volatility_target: 1.2,
      goal_min_rounds: 3,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid {var}: {reason}")]
  Invalid { var: &'static str, reason: String },
}

/// ---------------------------------------------------------------------------
/// Application Config
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub db_path: PathBuf,
  /// Hex SHA-256 of the gate password. `None` leaves the gate unconfigured.
  pub password_sha256: Option<String>,
  pub thresholds: EngineThresholds,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      db_path: PathBuf::from(DEFAULT_DB_PATH),
      password_sha256: None,
      thresholds: EngineThresholds::default(),
      log_format: LogFormat::Pretty,
    }
  }
}

impl AppConfig {
  /// Read configuration from the process environment. Call `dotenvy::dotenv()`
  /// first to pick up a `.env` file.
  pub fn from_env() -> Result<Self, ConfigError> {
    let db_path = env::var(DB_PATH_VAR)
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH));

    let password_sha256 = match env::var(PASSWORD_VAR) {
      Ok(hash) if !hash.trim().is_empty() => {
        let hash = hash.trim().to_lowercase();
        if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
          return Err(ConfigError::Invalid {
            var: PASSWORD_VAR,
            reason: "expected 64 hex characters".to_string(),
          });
        }
        Some(hash)
      }
      _ => None,
    };

    let thresholds = match env::var(THRESHOLDS_VAR) {
      Ok(json) if !json.trim().is_empty() => {
        serde_json::from_str(&json).map_err(|e| ConfigError::Invalid {
          var: THRESHOLDS_VAR,
          reason: e.to_string(),
        })?
      }
      _ => EngineThresholds::default(),
    };

    let log_format = env::var(LOG_FORMAT_VAR)
      .map(|v| LogFormat::parse(&v))
      .unwrap_or(LogFormat::Pretty);

    Ok(Self {
      db_path,
      password_sha256,
      thresholds,
      log_format,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const ALL_VARS: [&str; 4] = [DB_PATH_VAR, PASSWORD_VAR, THRESHOLDS_VAR, LOG_FORMAT_VAR];

  fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
    ALL_VARS.iter().map(|v| (*v, None)).collect()
  }

  #[test]
  #[serial]
  fn test_defaults_when_env_empty() {
    temp_env::with_vars(unset_all(), || {
      let config = AppConfig::from_env().expect("defaults should load");
      assert_eq!(config.db_path, PathBuf::from("golf-tracker.db"));
      assert!(config.password_sha256.is_none());
      assert_eq!(config.thresholds, EngineThresholds::default());
      assert_eq!(config.log_format, LogFormat::Pretty);
    });
  }

  #[test]
  #[serial]
  fn test_partial_threshold_override() {
    temp_env::with_vars(
      [
        (DB_PATH_VAR, Some("/tmp/rounds.db")),
        (THRESHOLDS_VAR, Some(r#"{"blowup_target": 2.5, "target_window": 8}"#)),
        (LOG_FORMAT_VAR, Some("json")),
        (PASSWORD_VAR, None),
      ],
      || {
        let config = AppConfig::from_env().expect("should load");
        assert_eq!(config.db_path, PathBuf::from("/tmp/rounds.db"));
        assert_eq!(config.thresholds.blowup_target, 2.5);
        assert_eq!(config.thresholds.target_window, 8);
        // Untouched fields keep their defaults
        assert_eq!(config.thresholds.difficulty_gap, 0.6);
        assert_eq!(config.log_format, LogFormat::Json);
      },
    );
  }

  #[test]
  #[serial]
  fn test_malformed_thresholds_rejected() {
    temp_env::with_vars(
      [(THRESHOLDS_VAR, Some("{not json")), (PASSWORD_VAR, None)],
      || {
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(THRESHOLDS_VAR));
      },
    );
  }

  #[test]
  #[serial]
  fn test_password_hash_validated_and_lowercased() {
    let upper = "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8";
    temp_env::with_vars([(PASSWORD_VAR, Some(upper)), (THRESHOLDS_VAR, None)], || {
      let config = AppConfig::from_env().expect("valid hash");
      assert_eq!(config.password_sha256.as_deref(), Some(upper.to_lowercase().as_str()));
    });

    temp_env::with_vars([(PASSWORD_VAR, Some("abc123")), (THRESHOLDS_VAR, None)], || {
      assert!(AppConfig::from_env().is_err());
    });
  }
}
