use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::{change_document, read_document, OnUnreadable};
use crate::db::AppState;
use crate::transfer::{export_document, export_file_name, import_document};

/// ---------------------------------------------------------------------------
/// Import / Export Commands
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
  pub file_name: String,
  pub json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
  pub courses: usize,
  pub rounds: usize,
  /// Rounds dropped because their course or tee was missing
  pub pruned: usize,
}

pub async fn export_data(state: &AppState, today: NaiveDate) -> Result<ExportPayload, String> {
  let doc = read_document(state).await?;
  let json = export_document(&doc).map_err(|e| format!("Export failed: {}", e))?;

  Ok(ExportPayload {
    file_name: export_file_name(today),
    json,
  })
}

/// Replace courses and rounds with an exported file's contents. Also the way
/// back from an unreadable stored document.
pub async fn import_data(state: &AppState, json: String) -> Result<ImportSummary, String> {
  let summary = change_document(state, OnUnreadable::StartEmpty, |doc| {
    let (imported, pruned) = import_document(doc, &json).map_err(|e| {
      warn!(error = %e, "Rejected import");
      format!("Import failed: {}", e)
    })?;
    *doc = imported;
    Ok(ImportSummary {
      courses: doc.courses.len(),
      rounds: doc.rounds.len(),
      pruned,
    })
  })
  .await?;

  info!(courses = summary.courses, rounds = summary.rounds, pruned = summary.pruned, "Imported data");
  Ok(summary)
}
