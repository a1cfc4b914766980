//! Next-round coaching targets
//!
//! Three rules, one target each: blow-ups, volatility, hard-hole cost.

use serde::{Deserialize, Serialize};

use crate::analysis::{blowup_count, mean, round_volatility, StrokeIndexScoring};
use crate::config::EngineThresholds;
use crate::models::Round;
use crate::scorebook::Scorebook;
use crate::window::trailing;

const ONBOARDING: [&str; 3] = [
  "Log your next round hole-by-hole (scores only is fine).",
  "Aim for stress-free golf: avoid hero shots and keep the ball in play.",
  "Pick one thing: club up on par 3s, or take less than driver on tight holes.",
];

const CUT_DOUBLES: &str =
  "Cut doubles+ first: if you're in trouble, take the boring punch-out instead of the miracle shot.";
const PROTECT_MOMENTUM: &str =
  "Protect momentum: treat bogey as a save, not a failure. No tilt swings.";
const STABILISE: &str =
  "Stabilise your round: pick conservative lines off the tee on the 3-4 holes you usually blow up.";
const PUSH_EDGE: &str =
  "You're getting steadier. Push one low-risk edge: better club choice on par 3s, or smarter layups.";
const HARD_HOLES_TAX: &str =
  "Hard holes tax you: play them as bogey holes. Keep it in play, aim centre-green, accept the 5.";
const SAFE_TARGET: &str =
  "On tough holes, commit to a safe target and swing at 80-90%. Clean contact beats brute force.";

/// Window averages the rules are evaluated on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetInputs {
  pub rounds: usize,
  pub avg_blowups: f64,
  pub avg_volatility: f64,
  pub hard_easy_gap: Option<f64>,
}

impl TargetInputs {
  /// `None` when there are no rounds at all
  pub fn compute(book: &Scorebook, rounds: &[&Round], thresholds: &EngineThresholds) -> Option<Self> {
    let window = trailing(rounds, thresholds.target_window);

    let blowups: Vec<f64> = window.iter().map(|r| blowup_count(book, r) as f64).collect();
    let volatility: Vec<f64> = window.iter().map(|r| round_volatility(book, r)).collect();

    Some(Self {
      rounds: window.len(),
      avg_blowups: mean(&blowups)?,
      avg_volatility: mean(&volatility)?,
      hard_easy_gap: StrokeIndexScoring::compute(book, &window).hard_easy_gap(),
    })
  }

  pub fn targets(&self, thresholds: &EngineThresholds) -> [String; 3] {
    let blowups = if self.avg_blowups >= thresholds.blowup_target {
      CUT_DOUBLES
    } else {
      PROTECT_MOMENTUM
    };

    let volatility = if self.avg_volatility >= thresholds.volatility_target {
      STABILISE
    } else {
      PUSH_EDGE
    };

    let difficulty = if self.hard_easy_gap.is_some_and(|gap| gap > thresholds.difficulty_gap) {
      HARD_HOLES_TAX
    } else {
      SAFE_TARGET
    };

    [blowups.to_string(), volatility.to_string(), difficulty.to_string()]
  }
}

/// Exactly three targets for the next round
pub fn next_round_targets(book: &Scorebook, rounds: &[&Round], thresholds: &EngineThresholds) -> [String; 3] {
  match TargetInputs::compute(book, rounds, thresholds) {
    Some(inputs) => inputs.targets(thresholds),
    None => ONBOARDING.map(str::to_string),
  }
}
