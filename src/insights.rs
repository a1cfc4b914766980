//! Trend and pattern insights over a filtered set of rounds
//!
//! Signals are computed first as numbers (`InsightReport`), then rendered to
//! short coaching sentences in a fixed order: trend, difficulty gap, fatigue,
//! penalties.

use serde::{Deserialize, Serialize};

use crate::analysis::{hole_diffs, mean, normalize_to_18, pens_for_round, to_par, StrokeIndexScoring};
use crate::config::EngineThresholds;
use crate::models::Round;
use crate::scorebook::Scorebook;
use crate::window::recent_and_prior;

/// Average 18-normalized to-par of the recent window, and of the prior
/// window when there is one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSignal {
  pub recent_avg: f64,
  pub recent_rounds: usize,
  pub prior_avg: Option<f64>,
  pub prior_rounds: usize,
}

impl TrendSignal {
  /// `prior - recent`; positive means scores are coming down
  pub fn improvement(&self) -> Option<f64> {
    self.prior_avg.map(|prior| prior - self.recent_avg)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InsightReport {
  /// Rounds the report was built from (before windowing)
  pub rounds_considered: usize,
  pub trend: Option<TrendSignal>,
  /// Hard minus easy SI bucket average over the recent window
  pub hard_easy_gap: Option<f64>,
  /// Mean per-round (second half - first half) per-hole drift
  pub fatigue_drift: Option<f64>,
  /// Mean penalty strokes per recent round
  pub avg_penalties: Option<f64>,
}

fn avg_to_par_18(book: &Scorebook, rounds: &[&Round]) -> Option<f64> {
  let values: Vec<f64> = rounds
    .iter()
    .map(|r| normalize_to_18(to_par(book, r) as f64, r.format))
    .collect();
  mean(&values)
}

/// Second-half minus first-half average diff for one round. The first half
/// is `floor(n / 2)` holes.
fn half_drift(diffs: &[i32]) -> Option<f64> {
  let split = diffs.len() / 2;
  let first: Vec<f64> = diffs[..split].iter().map(|d| *d as f64).collect();
  let second: Vec<f64> = diffs[split..].iter().map(|d| *d as f64).collect();
  Some(mean(&second)? - mean(&first)?)
}

impl InsightReport {
  pub fn compute(book: &Scorebook, rounds: &[&Round], thresholds: &EngineThresholds) -> Self {
    let windows = recent_and_prior(rounds, thresholds.insight_window);

    let trend = avg_to_par_18(book, &windows.recent).map(|recent_avg| TrendSignal {
      recent_avg,
      recent_rounds: windows.recent.len(),
      prior_avg: avg_to_par_18(book, &windows.prior),
      prior_rounds: windows.prior.len(),
    });

    let hard_easy_gap = StrokeIndexScoring::compute(book, &windows.recent).hard_easy_gap();

    let drifts: Vec<f64> = windows
      .recent
      .iter()
      .map(|r| hole_diffs(book, r))
      .filter(|diffs| diffs.len() >= thresholds.fatigue_min_holes)
      .filter_map(|diffs| half_drift(&diffs))
      .collect();

    let penalties: Vec<f64> = windows
      .recent
      .iter()
      .map(|r| pens_for_round(r) as f64)
      .collect();

    Self {
      rounds_considered: rounds.len(),
      trend,
      hard_easy_gap,
      fatigue_drift: mean(&drifts),
      avg_penalties: mean(&penalties),
    }
  }

  /// Render the report to sentences, in fixed order, capped at `max_insights`
  pub fn messages(&self, thresholds: &EngineThresholds) -> Vec<String> {
    if self.rounds_considered < thresholds.insight_min_rounds {
      return vec![format!(
        "Log at least {} rounds to unlock insights ({} so far).",
        thresholds.insight_min_rounds, self.rounds_considered
      )];
    }

    let mut messages = Vec::new();

    if let Some(trend) = &self.trend {
      match trend.improvement() {
        Some(delta) => messages.push(format!(
          "Trend: {:+.1} strokes per 18 over your last {} rounds vs the {} before (positive = improving).",
          delta, trend.recent_rounds, trend.prior_rounds
        )),
        None => messages.push(format!(
          "Your last {} rounds average {:+.1} to par on an 18-hole basis.",
          trend.recent_rounds, trend.recent_avg
        )),
      }
    }

    if self.hard_easy_gap.is_some_and(|gap| gap > thresholds.difficulty_gap) {
      messages.push(
        "Hard holes (SI 1-6) cost you far more than easy ones. Play them as bogey holes and keep the ball in play."
          .to_string(),
      );
    }

    match self.fatigue_drift {
      Some(drift) if drift > thresholds.fatigue_drift => messages.push(format!(
        "Your second half plays {:.2} strokes per hole worse than the first. Watch fuel, tempo and routine late in the round.",
        drift
      )),
      Some(drift) if drift < -thresholds.fatigue_drift => messages.push(
        "You finish stronger than you start. A proper warm-up could save strokes on the opening holes."
          .to_string(),
      ),
      _ => {}
    }

    if let Some(avg) = self.avg_penalties {
      if avg >= thresholds.penalty_burden {
        messages.push(format!(
          "Penalties are a lever: {:.1} per round lately. Take trouble out of play with safer lines and clubs.",
          avg
        ));
      }
    }

    messages.truncate(thresholds.max_insights);
    messages
  }
}

/// Up to `max_insights` observations about the given rounds
pub fn generate_insights(book: &Scorebook, rounds: &[&Round], thresholds: &EngineThresholds) -> Vec<String> {
  InsightReport::compute(book, rounds, thresholds).messages(thresholds)
}
