use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Distance band of the first putt on a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FirstPuttBucket {
  #[default]
  #[serde(rename = "")]
  Unset,
  #[serde(rename = "0-3")]
  Feet0To3,
  #[serde(rename = "4-6")]
  Feet4To6,
  #[serde(rename = "7-10")]
  Feet7To10,
  #[serde(rename = "11-20")]
  Feet11To20,
  #[serde(rename = "20+")]
  Feet20Plus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleResult {
  /// Position within the round (1-based), not the course hole number
  pub hole_number: u8,
  /// 0 = not entered
  #[serde(default)]
  pub score: u8,
  #[serde(default)]
  pub putts: Option<u8>,
  #[serde(default)]
  pub penalties: Option<u8>,
  #[serde(default)]
  pub fairway_hit: Option<bool>,
  #[serde(default)]
  pub gir: Option<bool>,
  #[serde(default)]
  pub first_putt_bucket: FirstPuttBucket,
  #[serde(default)]
  pub hole_notes: String,
}

impl HoleResult {
  /// A score-only result, the minimum the round form records
  pub fn scored(hole_number: u8, score: u8) -> Self {
    Self {
      hole_number,
      score,
      putts: None,
      penalties: None,
      fairway_hit: None,
      gir: None,
      first_putt_bucket: FirstPuttBucket::Unset,
      hole_notes: String::new(),
    }
  }

  pub fn is_scored(&self) -> bool {
    self.score > 0
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
  pub round_id: String,
  pub date: NaiveDate,
  #[serde(default)]
  pub round_type: String,
  /// 9 or 18
  pub format: u8,
  /// 1 or 10
  #[serde(default = "default_start_hole")]
  pub start_hole: u8,
  pub course_id: String,
  pub tee_id: String,
  #[serde(default)]
  pub adjusted_gross: Option<u32>,
  #[serde(default)]
  pub notes: String,
  #[serde(default)]
  pub hole_results: Vec<HoleResult>,
}

fn default_start_hole() -> u8 {
  1
}
