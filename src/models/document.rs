use serde::{Deserialize, Serialize};

use super::{Course, Goal, PlayerProfile, Round, Tee};

/// Schema version written with every saved document
pub const DOCUMENT_VERSION: u32 = 1;

/// Everything the tracker persists, stored as a single JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  #[serde(default = "current_version")]
  pub version: u32,
  pub courses: Vec<Course>,
  pub rounds: Vec<Round>,
  #[serde(default)]
  pub profile: PlayerProfile,
  #[serde(default)]
  pub goal: Goal,
}

fn current_version() -> u32 {
  DOCUMENT_VERSION
}

impl Default for Document {
  fn default() -> Self {
    Self {
      version: DOCUMENT_VERSION,
      courses: Vec::new(),
      rounds: Vec::new(),
      profile: PlayerProfile::default(),
      goal: Goal::default(),
    }
  }
}

impl Document {
  pub fn course(&self, course_id: &str) -> Option<&Course> {
    self.courses.iter().find(|c| c.course_id == course_id)
  }

  pub fn tee(&self, course_id: &str, tee_id: &str) -> Option<&Tee> {
    self.course(course_id).and_then(|c| c.tee(tee_id))
  }

  /// Drop rounds whose course or tee no longer exists. Returns how many went.
  pub fn prune_orphaned_rounds(&mut self) -> usize {
    let before = self.rounds.len();
    let courses = &self.courses;
    self.rounds.retain(|r| {
      courses
        .iter()
        .find(|c| c.course_id == r.course_id)
        .is_some_and(|c| c.tee(&r.tee_id).is_some())
    });
    before - self.rounds.len()
  }
}
