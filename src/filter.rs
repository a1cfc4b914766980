//! Round filtering for the analysis views

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Course, Round};

/// Selector value meaning "no restriction"
pub const ALL: &str = "all";

/// Separator of a composite `courseId::teeId` tee key
const TEE_KEY_SEPARATOR: &str = "::";

/// Filter settings as the portal selectors hold them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
  /// An empty date input reads as no bound
  #[serde(default, deserialize_with = "optional_date")]
  pub date_from: Option<NaiveDate>,
  #[serde(default, deserialize_with = "optional_date")]
  pub date_to: Option<NaiveDate>,
  #[serde(default = "all")]
  pub course_id: String,
  /// Composite `courseId::teeId` when `course_id` is "all", bare `teeId` otherwise
  #[serde(default = "all")]
  pub tee_key: String,
  #[serde(default = "all")]
  pub round_type: String,
  /// "9", "18" or "all"
  #[serde(default = "all")]
  pub format: String,
}

fn all() -> String {
  ALL.to_string()
}

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<String>::deserialize(deserializer)? {
    Some(raw) if !raw.trim().is_empty() => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
      .map(Some)
      .map_err(serde::de::Error::custom),
    _ => Ok(None),
  }
}

impl Default for FilterCriteria {
  fn default() -> Self {
    Self {
      date_from: None,
      date_to: None,
      course_id: all(),
      tee_key: all(),
      round_type: all(),
      format: all(),
    }
  }
}

/// A tee selection decoded from a tee key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeeSelection<'a> {
  Any,
  /// Tee within the already-selected course
  Tee(&'a str),
  /// Tee of a specific course, from a composite key
  CourseTee { course_id: &'a str, tee_id: &'a str },
}

impl<'a> TeeSelection<'a> {
  /// The key shape depends on whether a course is selected
  pub fn parse(course_id: &str, tee_key: &'a str) -> Self {
    if tee_key == ALL || tee_key.is_empty() {
      return TeeSelection::Any;
    }
    if course_id == ALL {
      match tee_key.split_once(TEE_KEY_SEPARATOR) {
        Some((course_id, tee_id)) => TeeSelection::CourseTee { course_id, tee_id },
        // Bare tee id: that tee on any course
        None => TeeSelection::Tee(tee_key),
      }
    } else {
      TeeSelection::Tee(tee_key)
    }
  }

  fn matches(&self, round: &Round) -> bool {
    match self {
      TeeSelection::Any => true,
      TeeSelection::Tee(tee_id) => round.tee_id == *tee_id,
      TeeSelection::CourseTee { course_id, tee_id } => {
        round.course_id == *course_id && round.tee_id == *tee_id
      }
    }
  }
}

pub fn composite_tee_key(course_id: &str, tee_id: &str) -> String {
  format!("{}{}{}", course_id, TEE_KEY_SEPARATOR, tee_id)
}

impl FilterCriteria {
  pub fn matches(&self, round: &Round) -> bool {
    if self.date_from.is_some_and(|from| round.date < from) {
      return false;
    }
    if self.date_to.is_some_and(|to| round.date > to) {
      return false;
    }
    if self.course_id != ALL && round.course_id != self.course_id {
      return false;
    }
    if !TeeSelection::parse(&self.course_id, &self.tee_key).matches(round) {
      return false;
    }
    if self.round_type != ALL && round.round_type != self.round_type {
      return false;
    }
    if self.format != ALL && round.format.to_string() != self.format {
      return false;
    }
    true
  }
}

/// Rounds passing every criterion, in input order
pub fn apply_filters<'a>(rounds: &[&'a Round], criteria: &FilterCriteria) -> Vec<&'a Round> {
  rounds.iter().copied().filter(|r| criteria.matches(r)).collect()
}

/// One entry of the tee selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeeOption {
  pub key: String,
  pub label: String,
}

/// Tee selector entries for the current course selection, "all" first
pub fn tee_key_options(courses: &[Course], course_id: &str) -> Vec<TeeOption> {
  let mut options = vec![TeeOption {
    key: all(),
    label: "All tees".to_string(),
  }];

  for course in courses {
    if course_id == ALL {
      options.extend(course.tees.iter().map(|t| TeeOption {
        key: composite_tee_key(&course.course_id, &t.tee_id),
        label: format!("{} - {}", course.name, t.tee_name),
      }));
    } else if course.course_id == course_id {
      options.extend(course.tees.iter().map(|t| TeeOption {
        key: t.tee_id.clone(),
        label: t.tee_name.clone(),
      }));
    }
  }

  options
}
