//! Command surface over `AppState`
//!
//! Every command returns `Result<T, String>` so a UI shell can show the error
//! text as-is. Mutations run load → change → save inside one transaction.

pub mod courses;
pub mod gate;
pub mod portal;
pub mod profile;
pub mod rounds;
pub mod transfer;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::db::AppState;
use crate::goal::ensure_goal;
use crate::models::Document;
use crate::scorebook::Scorebook;
use crate::store::{load_document, load_document_checked, save_document, StoreError};

/// What a write does when the stored body cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnUnreadable {
  /// Fail and leave the stored body alone
  Refuse,
  /// Replace the stored body, starting from an empty document
  StartEmpty,
}

/// Read the document without changing it
pub(crate) async fn read_document(state: &AppState) -> Result<Document, String> {
  load_document(&state.db)
    .await
    .map_err(|e| format!("Failed to load data: {}", e))
}

/// Apply `change` to the stored document in a transaction. Nothing is saved
/// when `change` fails or the stored body is unreadable.
pub(crate) async fn update_document<T, F>(state: &AppState, change: F) -> Result<T, String>
where
  F: FnOnce(&mut Document) -> Result<T, String>,
{
  change_document(state, OnUnreadable::Refuse, change).await
}

pub(crate) async fn change_document<T, F>(state: &AppState, on_unreadable: OnUnreadable, change: F) -> Result<T, String>
where
  F: FnOnce(&mut Document) -> Result<T, String>,
{
  let mut tx = state
    .db
    .begin()
    .await
    .map_err(|e| format!("Failed to start transaction: {}", e))?;

  let mut doc = match load_document_checked(&mut *tx).await {
    Ok((doc, _)) => doc,
    Err(StoreError::Corrupt(e)) if on_unreadable == OnUnreadable::StartEmpty => {
      warn!(error = %e, "Replacing unreadable stored document");
      Document::default()
    }
    Err(e) => return Err(format!("Failed to load data: {}", e)),
  };

  let output = change(&mut doc)?;

  save_document(&mut *tx, &doc)
    .await
    .map_err(|e| format!("Failed to save data: {}", e))?;

  tx.commit()
    .await
    .map_err(|e| format!("Failed to commit: {}", e))?;

  Ok(output)
}

/// Load the document, initializing the goal baseline if it is due. The
/// transition and its save share a transaction. Writes only when the goal
/// moved or orphaned rounds were dropped; an unreadable body is never written.
pub(crate) async fn load_with_goal(state: &AppState, today: NaiveDate) -> Result<Document, String> {
  let mut tx = state
    .db
    .begin()
    .await
    .map_err(|e| format!("Failed to start transaction: {}", e))?;

  let (mut doc, pruned) = match load_document_checked(&mut *tx).await {
    Ok(loaded) => loaded,
    Err(StoreError::Corrupt(e)) => {
      warn!(error = %e, "Stored document is unreadable, showing it as empty");
      return Ok(Document::default());
    }
    Err(e) => return Err(format!("Failed to load data: {}", e)),
  };

  let next = ensure_goal(&doc.goal, &Scorebook::from_document(&doc), today, &state.config.thresholds);
  let goal_changed = next != doc.goal;
  if goal_changed {
    info!(
      baseline_blowups = next.baseline_blowups(),
      window_rounds = next.window_rounds,
      "Goal baseline initialized"
    );
    doc.goal = next;
  }

  if goal_changed || pruned > 0 {
    save_document(&mut *tx, &doc)
      .await
      .map_err(|e| format!("Failed to save data: {}", e))?;
  }

  tx.commit()
    .await
    .map_err(|e| format!("Failed to commit: {}", e))?;

  Ok(doc)
}
