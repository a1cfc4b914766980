//! JSON export and import of the whole document

use serde_json::Value;

use crate::models::{Course, Document, Round};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Invalid JSON structure: expected \"courses\" and \"rounds\" arrays")]
  Structure,
}

/// Pretty-printed document, suitable for a backup file
pub fn export_document(doc: &Document) -> Result<String, TransferError> {
  Ok(serde_json::to_string_pretty(doc)?)
}

/// Suggested file name for an export made on `date`
pub fn export_file_name(date: chrono::NaiveDate) -> String {
  format!("golf-tracker-export-{}.json", date.format("%Y-%m-%d"))
}

/// Replace courses and rounds with those in `json`. Profile and goal are kept.
/// Returns the new document and how many orphaned rounds were dropped.
pub fn import_document(current: &Document, json: &str) -> Result<(Document, usize), TransferError> {
  let mut value: Value = serde_json::from_str(json.trim())?;

  let (Some(courses), Some(rounds)) = (
    value.get_mut("courses").filter(|v| v.is_array()).map(Value::take),
    value.get_mut("rounds").filter(|v| v.is_array()).map(Value::take),
  ) else {
    return Err(TransferError::Structure);
  };

  let mut doc = Document {
    courses: serde_json::from_value::<Vec<Course>>(courses)?,
    rounds: serde_json::from_value::<Vec<Round>>(rounds)?,
    ..current.clone()
  };
  let pruned = doc.prune_orphaned_rounds();

  Ok((doc, pruned))
}
