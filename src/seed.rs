//! Example course for first launch

use crate::editor::new_id;
use crate::models::{Course, Document, Hole, Tee};

pub const EXAMPLE_PARS: [u8; 18] = [4, 4, 3, 4, 5, 4, 3, 4, 5, 4, 4, 3, 4, 5, 4, 3, 4, 5];

const EXAMPLE_COURSE_NAME: &str = "Example Course (edit me)";
const EXAMPLE_LOCATION: &str = "—";
const EXAMPLE_TEE_NAME: &str = "White";
const EXAMPLE_COURSE_RATING: f64 = 71.2;
const EXAMPLE_SLOPE_RATING: i32 = 128;

/// Par-72 card with stroke index in hole order
pub fn example_holes() -> Vec<Hole> {
  EXAMPLE_PARS
    .iter()
    .enumerate()
    .map(|(i, par)| Hole {
      hole_number: i as u8 + 1,
      par: *par,
      yardage: 350 + (i as u32 % 5) * 20,
      stroke_index: i as u8 + 1,
    })
    .collect()
}

pub fn example_course() -> Course {
  let holes = example_holes();
  Course {
    course_id: new_id("course"),
    name: EXAMPLE_COURSE_NAME.to_string(),
    location: EXAMPLE_LOCATION.to_string(),
    tees: vec![Tee {
      tee_id: new_id("tee"),
      tee_name: EXAMPLE_TEE_NAME.to_string(),
      course_rating: Some(EXAMPLE_COURSE_RATING),
      slope_rating: Some(EXAMPLE_SLOPE_RATING),
      par_total: holes.iter().map(|h| h.par as u32).sum(),
      holes,
    }],
  }
}

/// Insert the example course when there are no courses. Returns true if it did.
pub fn seed_if_empty(doc: &mut Document) -> bool {
  if !doc.courses.is_empty() {
    return false;
  }
  doc.courses.push(example_course());
  true
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_example_card() {
    let holes = example_holes();
    assert_eq!(holes.len(), 18);
    assert_eq!(holes.iter().map(|h| h.par as u32).sum::<u32>(), 72);
    assert_eq!(holes[0].yardage, 350);
    assert_eq!(holes[4].yardage, 430);
    assert_eq!(holes[5].yardage, 350);
    assert_eq!(holes[17].stroke_index, 18);
  }

  #[test]
  fn test_seed_only_when_empty() {
    let mut doc = Document::default();
    assert!(seed_if_empty(&mut doc));
    assert_eq!(doc.courses.len(), 1);

    let course = &doc.courses[0];
    assert_eq!(course.name, "Example Course (edit me)");
    assert!(course.course_id.starts_with("course_"));
    assert_eq!(course.tees[0].par_total, 72);
    assert_eq!(course.tees[0].slope_rating, Some(128));

    assert!(!seed_if_empty(&mut doc));
    assert_eq!(doc.courses.len(), 1);
  }
}
