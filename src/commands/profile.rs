use tracing::info;

use super::{read_document, update_document};
use crate::db::AppState;
use crate::models::{Goal, PlayerProfile, Ruleset};

/// ---------------------------------------------------------------------------
/// Profile Commands
/// ---------------------------------------------------------------------------

pub async fn get_profile(state: &AppState) -> Result<PlayerProfile, String> {
  Ok(read_document(state).await?.profile)
}

/// Update the fields that are given; `None` keeps the stored value
pub async fn update_profile(
  state: &AppState,
  home_country_ruleset: Option<Ruleset>,
  handicap_index: Option<f64>,
) -> Result<PlayerProfile, String> {
  update_document(state, |doc| {
    if let Some(ruleset) = home_country_ruleset {
      doc.profile.home_country_ruleset = ruleset;
    }
    if let Some(index) = handicap_index {
      if !(-10.0..=54.0).contains(&index) {
        return Err(format!("Handicap index out of range: {}", index));
      }
      doc.profile.handicap_index = Some(index);
    }
    Ok(doc.profile.clone())
  })
  .await
}

/// ---------------------------------------------------------------------------
/// Goal Commands
/// ---------------------------------------------------------------------------

pub async fn get_goal(state: &AppState) -> Result<Goal, String> {
  Ok(read_document(state).await?.goal)
}

/// Replace the goal settings. The baseline starts over.
pub async fn configure_goal(
  state: &AppState,
  active: bool,
  window_rounds: usize,
  reduction_pct: u32,
) -> Result<Goal, String> {
  let goal = update_document(state, |doc| {
    doc.goal = doc.goal.reconfigure(active, window_rounds, reduction_pct);
    Ok(doc.goal.clone())
  })
  .await?;

  info!(active, window_rounds = goal.window_rounds, reduction_pct = goal.reduction_pct, "Goal reconfigured");
  Ok(goal)
}
