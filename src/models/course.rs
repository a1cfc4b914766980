use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hole {
  pub hole_number: u8,
  pub par: u8,
  #[serde(default)]
  pub yardage: u32,
  /// 1 (hardest) to 18; 0 means "not set" and keeps the hole out of SI buckets
  #[serde(default)]
  pub stroke_index: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tee {
  pub tee_id: String,
  pub tee_name: String,
  #[serde(default)]
  pub course_rating: Option<f64>,
  #[serde(default)]
  pub slope_rating: Option<i32>,
  #[serde(default)]
  pub par_total: u32,
  #[serde(default)]
  pub holes: Vec<Hole>,
}

impl Tee {
  /// Sum of hole pars, as stored in `par_total` by the course editor
  pub fn computed_par_total(&self) -> u32 {
    self.holes.iter().map(|h| h.par as u32).sum()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
  pub course_id: String,
  pub name: String,
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub tees: Vec<Tee>,
}

impl Course {
  pub fn tee(&self, tee_id: &str) -> Option<&Tee> {
    self.tees.iter().find(|t| t.tee_id == tee_id)
  }
}
