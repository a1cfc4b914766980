//! Course and round editing
//!
//! Validated mutations of a `Document`. The caller loads the document, applies
//! one of these and saves it back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::geometry::played_holes;
use crate::models::{Course, Document, FirstPuttBucket, Hole, HoleResult, Round, Tee};

const HOLES_PER_CARD: usize = 18;
const DEFAULT_TEE_NAME: &str = "White";
const MAX_SCORE: i32 = 30;
const MAX_PUTTS: i32 = 6;
const MAX_PENALTIES: i32 = 5;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
  #[error("Course name is required")]
  MissingName,
  #[error("A tee needs exactly 18 holes, got {0}")]
  HoleCount(usize),
  #[error("Every hole needs a par of 3, 4 or 5 (hole {0})")]
  InvalidPar(u8),
  #[error("Every hole needs a stroke index between 1 and 18 (hole {0})")]
  InvalidStrokeIndex(u8),
  #[error("Stroke index {0} is used on more than one hole")]
  DuplicateStrokeIndex(u8),
  #[error("Course not found: {0}")]
  CourseNotFound(String),
  #[error("Tee not found: {0}")]
  TeeNotFound(String),
  #[error("Round format must be 9 or 18, got {0}")]
  InvalidFormat(u8),
  #[error("Start hole must be 1 or 10, got {0}")]
  InvalidStartHole(u8),
  #[error("Enter at least one hole score")]
  NoScores,
  #[error("Adjusted gross must be greater than 0")]
  InvalidAdjustedGross,
}

/// Prefixed random id, e.g. `round_4f0c...`
pub fn new_id(prefix: &str) -> String {
  format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// ---------------------------------------------------------------------------
/// Courses
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleDraft {
  pub par: u8,
  #[serde(default)]
  pub yardage: u32,
  pub stroke_index: u8,
}

/// Course form contents. No `course_id` creates a new course with one tee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
  #[serde(default)]
  pub course_id: Option<String>,
  #[serde(default)]
  pub tee_id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub tee_name: String,
  #[serde(default)]
  pub course_rating: Option<f64>,
  #[serde(default)]
  pub slope_rating: Option<i32>,
  pub holes: Vec<HoleDraft>,
}

/// Hole numbers come from position on the card
fn validate_holes(drafts: &[HoleDraft]) -> Result<Vec<Hole>, EditorError> {
  if drafts.len() != HOLES_PER_CARD {
    return Err(EditorError::HoleCount(drafts.len()));
  }

  let mut seen = HashSet::new();
  drafts
    .iter()
    .enumerate()
    .map(|(i, draft)| {
      let hole_number = i as u8 + 1;
      if !matches!(draft.par, 3..=5) {
        return Err(EditorError::InvalidPar(hole_number));
      }
      if !(1..=18).contains(&draft.stroke_index) {
        return Err(EditorError::InvalidStrokeIndex(hole_number));
      }
      if !seen.insert(draft.stroke_index) {
        return Err(EditorError::DuplicateStrokeIndex(draft.stroke_index));
      }
      Ok(Hole {
        hole_number,
        par: draft.par,
        yardage: draft.yardage,
        stroke_index: draft.stroke_index,
      })
    })
    .collect()
}

fn apply_tee(tee: &mut Tee, draft: &CourseDraft, holes: Vec<Hole>) {
  tee.tee_name = match draft.tee_name.trim() {
    "" => DEFAULT_TEE_NAME.to_string(),
    name => name.to_string(),
  };
  tee.course_rating = draft.course_rating;
  tee.slope_rating = draft.slope_rating;
  tee.holes = holes;
  tee.par_total = tee.computed_par_total();
}

fn empty_tee() -> Tee {
  Tee {
    tee_id: new_id("tee"),
    tee_name: DEFAULT_TEE_NAME.to_string(),
    course_rating: None,
    slope_rating: None,
    par_total: 0,
    holes: Vec::new(),
  }
}

/// Create or edit a course. An edit updates the tee named by `tee_id`, falling
/// back to the first tee. Returns the `(course_id, tee_id)` written.
pub fn upsert_course(doc: &mut Document, draft: &CourseDraft) -> Result<(String, String), EditorError> {
  let name = draft.name.trim();
  if name.is_empty() {
    return Err(EditorError::MissingName);
  }
  let holes = validate_holes(&draft.holes)?;

  let course = match &draft.course_id {
    Some(course_id) => doc
      .courses
      .iter_mut()
      .find(|c| &c.course_id == course_id)
      .ok_or_else(|| EditorError::CourseNotFound(course_id.clone()))?,
    None => {
      doc.courses.push(Course {
        course_id: new_id("course"),
        name: String::new(),
        location: String::new(),
        tees: Vec::new(),
      });
      let last = doc.courses.len() - 1;
      &mut doc.courses[last]
    }
  };

  course.name = name.to_string();
  course.location = draft.location.trim().to_string();

  let selected = draft
    .tee_id
    .as_ref()
    .and_then(|id| course.tees.iter().position(|t| &t.tee_id == id));
  let index = match (selected, course.tees.is_empty()) {
    (Some(index), _) => index,
    (None, false) => 0,
    (None, true) => {
      course.tees.push(empty_tee());
      0
    }
  };

  let tee = &mut course.tees[index];
  apply_tee(tee, draft, holes);

  Ok((course.course_id.clone(), tee.tee_id.clone()))
}

/// Remove a course and every round played on it. Returns the rounds removed.
pub fn delete_course(doc: &mut Document, course_id: &str) -> Result<usize, EditorError> {
  let before = doc.courses.len();
  doc.courses.retain(|c| c.course_id != course_id);
  if doc.courses.len() == before {
    return Err(EditorError::CourseNotFound(course_id.to_string()));
  }

  let rounds_before = doc.rounds.len();
  doc.rounds.retain(|r| r.course_id != course_id);
  Ok(rounds_before - doc.rounds.len())
}

/// ---------------------------------------------------------------------------
/// Rounds
/// ---------------------------------------------------------------------------

/// One row of the score form, in play order. Out-of-range numbers are clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleEntry {
  #[serde(default)]
  pub score: i32,
  #[serde(default)]
  pub putts: Option<i32>,
  #[serde(default)]
  pub penalties: Option<i32>,
  #[serde(default)]
  pub fairway_hit: Option<bool>,
  #[serde(default)]
  pub gir: Option<bool>,
  #[serde(default)]
  pub first_putt_bucket: FirstPuttBucket,
  #[serde(default)]
  pub hole_notes: String,
}

impl HoleEntry {
  pub fn score(score: i32) -> Self {
    Self {
      score,
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDraft {
  pub date: NaiveDate,
  #[serde(default)]
  pub round_type: String,
  pub format: u8,
  #[serde(default = "default_start_hole")]
  pub start_hole: u8,
  pub course_id: String,
  pub tee_id: String,
  /// Gross after per-hole maximums, used for the differential when given
  #[serde(default)]
  pub adjusted_gross: Option<u32>,
  #[serde(default)]
  pub notes: String,
  pub holes: Vec<HoleEntry>,
}

fn default_start_hole() -> u8 {
  1
}

fn clamp_stat(value: i32, max: i32) -> u8 {
  value.clamp(0, max) as u8
}

/// Validate and append a round. Returns the new round id.
pub fn add_round(doc: &mut Document, draft: &RoundDraft) -> Result<String, EditorError> {
  if draft.format != 9 && draft.format != 18 {
    return Err(EditorError::InvalidFormat(draft.format));
  }
  if draft.start_hole != 1 && draft.start_hole != 10 {
    return Err(EditorError::InvalidStartHole(draft.start_hole));
  }
  if draft.adjusted_gross == Some(0) {
    return Err(EditorError::InvalidAdjustedGross);
  }

  let course = doc
    .course(&draft.course_id)
    .ok_or_else(|| EditorError::CourseNotFound(draft.course_id.clone()))?;
  let tee = course
    .tee(&draft.tee_id)
    .ok_or_else(|| EditorError::TeeNotFound(draft.tee_id.clone()))?;

  let mut round = Round {
    round_id: new_id("round"),
    date: draft.date,
    round_type: draft.round_type.trim().to_string(),
    format: draft.format,
    start_hole: draft.start_hole,
    course_id: draft.course_id.clone(),
    tee_id: draft.tee_id.clone(),
    adjusted_gross: draft.adjusted_gross,
    notes: draft.notes.trim().to_string(),
    hole_results: Vec::new(),
  };

  let played = played_holes(&round, Some(tee)).len();
  round.hole_results = draft
    .holes
    .iter()
    .take(played)
    .enumerate()
    .map(|(i, entry)| HoleResult {
      hole_number: i as u8 + 1,
      score: clamp_stat(entry.score, MAX_SCORE),
      putts: entry.putts.map(|p| clamp_stat(p, MAX_PUTTS)),
      penalties: entry.penalties.map(|p| clamp_stat(p, MAX_PENALTIES)),
      fairway_hit: entry.fairway_hit,
      gir: entry.gir,
      first_putt_bucket: entry.first_putt_bucket,
      hole_notes: entry.hole_notes.trim().to_string(),
    })
    .collect();

  if !round.hole_results.iter().any(HoleResult::is_scored) {
    return Err(EditorError::NoScores);
  }

  let round_id = round.round_id.clone();
  doc.rounds.push(round);
  Ok(round_id)
}
