//! Portal: the analysis dashboard for a filtered set of rounds

use chrono::NaiveDate;
use serde::Serialize;

use super::load_with_goal;
use crate::analysis::{BucketSeries, ParTypeScoring, PortalStats, StrokeIndexScoring, TrendSeries};
use crate::db::AppState;
use crate::filter::{apply_filters, tee_key_options, FilterCriteria, TeeOption};
use crate::goal::{goal_progress, GoalProgress};
use crate::insights::generate_insights;
use crate::scorebook::Scorebook;
use crate::targets::next_round_targets;
use crate::window::sorted_by_date;

/// Everything the portal view renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalReport {
  pub filter: FilterCriteria,
  pub tee_options: Vec<TeeOption>,
  pub stats: PortalStats,
  pub targets: [String; 3],
  pub insights: Vec<String>,
  /// Goal progress is measured over all rounds, not the filter
  pub goal: GoalProgress,
  pub trend: TrendSeries,
  pub par_types: BucketSeries,
  pub stroke_index: BucketSeries,
}

/// Build the portal for `filter`. Initializes the goal baseline when due.
pub async fn get_portal_report(
  state: &AppState,
  filter: FilterCriteria,
  today: NaiveDate,
) -> Result<PortalReport, String> {
  let doc = load_with_goal(state, today).await?;
  let thresholds = &state.config.thresholds;
  let book = Scorebook::from_document(&doc);

  let rounds = sorted_by_date(&apply_filters(&book.rounds(), &filter));

  Ok(PortalReport {
    tee_options: tee_key_options(book.courses(), &filter.course_id),
    stats: PortalStats::compute(&book, &rounds),
    targets: next_round_targets(&book, &rounds, thresholds),
    insights: generate_insights(&book, &rounds, thresholds),
    goal: goal_progress(&doc.goal, &book, thresholds),
    trend: TrendSeries::compute(&book, &rounds),
    par_types: ParTypeScoring::compute(&book, &rounds).into(),
    stroke_index: StrokeIndexScoring::compute(&book, &rounds).into(),
    filter,
  })
}
