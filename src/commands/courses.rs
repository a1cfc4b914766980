use serde::Serialize;
use tracing::info;

use super::{read_document, update_document};
use crate::db::AppState;
use crate::editor::{self, CourseDraft};
use crate::filter::{tee_key_options, TeeOption};
use crate::models::Course;
use crate::seed;

/// ---------------------------------------------------------------------------
/// Course Commands
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCourse {
  pub course_id: String,
  pub tee_id: String,
}

pub async fn list_courses(state: &AppState) -> Result<Vec<Course>, String> {
  Ok(read_document(state).await?.courses)
}

/// Tee selector entries for a course selection ("all" for every course)
pub async fn get_tee_options(state: &AppState, course_id: String) -> Result<Vec<TeeOption>, String> {
  let doc = read_document(state).await?;
  Ok(tee_key_options(&doc.courses, &course_id))
}

pub async fn save_course(state: &AppState, draft: CourseDraft) -> Result<SavedCourse, String> {
  let (course_id, tee_id) = update_document(state, |doc| {
    editor::upsert_course(doc, &draft).map_err(|e| format!("Failed to save course: {}", e))
  })
  .await?;

  info!(course_id = %course_id, tee_id = %tee_id, "Saved course");
  Ok(SavedCourse { course_id, tee_id })
}

/// Delete a course and its rounds. Returns how many rounds went with it.
pub async fn delete_course(state: &AppState, course_id: String) -> Result<usize, String> {
  let removed = update_document(state, |doc| {
    editor::delete_course(doc, &course_id).map_err(|e| format!("Failed to delete course: {}", e))
  })
  .await?;

  info!(course_id = %course_id, rounds_removed = removed, "Deleted course");
  Ok(removed)
}

/// Add the example course on first launch. Returns true if it was added.
pub async fn seed_example_course(state: &AppState) -> Result<bool, String> {
  let seeded = update_document(state, |doc| Ok(seed::seed_if_empty(doc))).await?;
  if seeded {
    info!("Seeded example course");
  }
  Ok(seeded)
}
