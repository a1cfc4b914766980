use serde::Serialize;
use tracing::info;

use super::{read_document, update_document};
use crate::analysis::RoundMetrics;
use crate::db::AppState;
use crate::editor::{self, RoundDraft};
use crate::models::Round;
use crate::scorebook::Scorebook;

const MISSING_LABEL: &str = "—";

/// ---------------------------------------------------------------------------
/// Round Commands
/// ---------------------------------------------------------------------------

/// One line of the raw rounds table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRow {
  pub round: Round,
  pub course_name: String,
  pub tee_name: String,
  pub metrics: RoundMetrics,
}

/// Every round, newest first, with its computed metrics
pub async fn get_rounds_table(state: &AppState) -> Result<Vec<RoundRow>, String> {
  let doc = read_document(state).await?;
  let book = Scorebook::from_document(&doc);

  let mut rounds = book.rounds();
  rounds.sort_by(|a, b| b.date.cmp(&a.date));

  Ok(
    rounds
      .into_iter()
      .map(|round| {
        let course = book.course(&round.course_id);
        RoundRow {
          course_name: course.map_or_else(|| MISSING_LABEL.to_string(), |c| c.name.clone()),
          tee_name: book
            .tee_for(round)
            .map_or_else(|| MISSING_LABEL.to_string(), |t| t.tee_name.clone()),
          metrics: RoundMetrics::compute(&book, round),
          round: round.clone(),
        }
      })
      .collect(),
  )
}

/// Validate and store a round. Returns the new round id.
pub async fn add_round(state: &AppState, draft: RoundDraft) -> Result<String, String> {
  let round_id = update_document(state, |doc| {
    editor::add_round(doc, &draft).map_err(|e| format!("Failed to save round: {}", e))
  })
  .await?;

  info!(round_id = %round_id, course_id = %draft.course_id, date = %draft.date, "Saved round");
  Ok(round_id)
}
