//! Explicit analysis context: the loaded courses and rounds every engine call
//! reads from.

use crate::geometry::played_holes;
use crate::models::{Course, Document, Hole, HoleResult, Round, Tee};

#[derive(Debug, Clone, Copy)]
pub struct Scorebook<'a> {
  courses: &'a [Course],
  rounds: &'a [Round],
}

impl<'a> Scorebook<'a> {
  pub fn new(courses: &'a [Course], rounds: &'a [Round]) -> Self {
    Self { courses, rounds }
  }

  pub fn from_document(doc: &'a Document) -> Self {
    Self::new(&doc.courses, &doc.rounds)
  }

  pub fn courses(&self) -> &'a [Course] {
    self.courses
  }

  /// All rounds, in stored order
  pub fn rounds(&self) -> Vec<&'a Round> {
    self.rounds.iter().collect()
  }

  pub fn course(&self, course_id: &str) -> Option<&'a Course> {
    self.courses.iter().find(|c| c.course_id == course_id)
  }

  pub fn tee_for(&self, round: &Round) -> Option<&'a Tee> {
    self.course(&round.course_id).and_then(|c| c.tee(&round.tee_id))
  }

  pub fn played_holes(&self, round: &Round) -> Vec<&'a Hole> {
    played_holes(round, self.tee_for(round))
  }

  /// Played holes zipped with the round's results, position by position.
  /// Extra entries on either side are dropped.
  pub fn aligned<'r>(&self, round: &'r Round) -> Vec<(&'a Hole, &'r HoleResult)> {
    self
      .played_holes(round)
      .into_iter()
      .zip(round.hole_results.iter())
      .collect()
  }
}
