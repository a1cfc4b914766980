use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GOAL_WINDOW_ROUNDS: usize = 5;
pub const DEFAULT_GOAL_REDUCTION_PCT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
  #[default]
  ReduceBlowups,
}

/// Baseline state of a goal. Moves from `Uninitialized` to `Tracking` once and
/// never back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GoalBaseline {
  #[default]
  Uninitialized,
  Tracking {
    baseline_blowups: f64,
    created_at: NaiveDate,
  },
}

/// Stored as the flat `GoalRecord` shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GoalRecord", into = "GoalRecord")]
pub struct Goal {
  pub active: bool,
  pub goal_type: GoalType,
  pub window_rounds: usize,
  pub reduction_pct: u32,
  pub baseline: GoalBaseline,
}

impl Default for Goal {
  fn default() -> Self {
    Self {
      active: true,
      goal_type: GoalType::ReduceBlowups,
      window_rounds: DEFAULT_GOAL_WINDOW_ROUNDS,
      reduction_pct: DEFAULT_GOAL_REDUCTION_PCT,
      baseline: GoalBaseline::Uninitialized,
    }
  }
}

impl Goal {
  pub fn baseline_blowups(&self) -> Option<f64> {
    match self.baseline {
      GoalBaseline::Tracking { baseline_blowups, .. } => Some(baseline_blowups),
      GoalBaseline::Uninitialized => None,
    }
  }

  pub fn is_tracking(&self) -> bool {
    matches!(self.baseline, GoalBaseline::Tracking { .. })
  }
}

/// ---------------------------------------------------------------------------
/// Stored Shape
/// ---------------------------------------------------------------------------

/// `{active, type, windowRounds, reductionPct, baselineBlowups, createdAt}`
/// with nullable baseline fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalRecord {
  #[serde(default = "default_active")]
  active: bool,
  #[serde(rename = "type", default)]
  goal_type: GoalType,
  #[serde(default = "default_window_rounds")]
  window_rounds: usize,
  #[serde(default = "default_reduction_pct")]
  reduction_pct: u32,
  #[serde(default)]
  baseline_blowups: Option<f64>,
  #[serde(default)]
  created_at: Option<NaiveDate>,
}

fn default_active() -> bool {
  true
}

fn default_window_rounds() -> usize {
  DEFAULT_GOAL_WINDOW_ROUNDS
}

fn default_reduction_pct() -> u32 {
  DEFAULT_GOAL_REDUCTION_PCT
}

impl From<GoalRecord> for Goal {
  fn from(record: GoalRecord) -> Self {
    // A half-written baseline counts as not yet set
    let baseline = match (record.baseline_blowups, record.created_at) {
      (Some(baseline_blowups), Some(created_at)) if baseline_blowups.is_finite() => GoalBaseline::Tracking {
        baseline_blowups,
        created_at,
      },
      _ => GoalBaseline::Uninitialized,
    };

    Self {
      active: record.active,
      goal_type: record.goal_type,
      window_rounds: record.window_rounds,
      reduction_pct: record.reduction_pct,
      baseline,
    }
  }
}

impl From<Goal> for GoalRecord {
  fn from(goal: Goal) -> Self {
    let (baseline_blowups, created_at) = match goal.baseline {
      GoalBaseline::Tracking {
        baseline_blowups,
        created_at,
      } => (Some(baseline_blowups), Some(created_at)),
      GoalBaseline::Uninitialized => (None, None),
    };

    Self {
      active: goal.active,
      goal_type: goal.goal_type,
      window_rounds: goal.window_rounds,
      reduction_pct: goal.reduction_pct,
      baseline_blowups,
      created_at,
    }
  }
}
