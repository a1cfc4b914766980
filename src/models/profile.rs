use serde::{Deserialize, Serialize};

/// Handicap ruleset of the player's home country (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Ruleset {
  #[default]
  Whs,
  Usga,
  Ra,
  GolfAustralia,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
  #[serde(default)]
  pub home_country_ruleset: Ruleset,
  #[serde(default)]
  pub handicap_index: Option<f64>,
}
