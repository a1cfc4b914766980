//! Deterministic analysis layer for round metrics
//!
//! Every function here is total: missing tees, unscored holes and short
//! result lists produce 0, `None` or empty output instead of errors.

use serde::{Deserialize, Serialize};

use crate::models::{Hole, Round, Tee};
use crate::scorebook::Scorebook;

/// Slope rating of a course of standard difficulty
const STANDARD_SLOPE: f64 = 113.0;

/// Playing Conditions Calculation adjustment. Always 0 until daily
/// conditions are tracked.
const PCC: f64 = 0.0;

/// ---------------------------------------------------------------------------
/// Small numeric helpers
/// ---------------------------------------------------------------------------

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    None
  } else {
    Some(values.iter().sum::<f64>() / values.len() as f64)
  }
}

/// Sample standard deviation (n - 1). 0 below two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
  if values.len() < 2 {
    return 0.0;
  }
  let avg = values.iter().sum::<f64>() / values.len() as f64;
  let var = values.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
  var.sqrt()
}

/// ---------------------------------------------------------------------------
/// Tier 1: Per-Round Metrics
/// ---------------------------------------------------------------------------

/// Sum of every entered score. Unset holes (0) add nothing.
pub fn gross_for_round(round: &Round) -> u32 {
  round.hole_results.iter().map(|r| r.score as u32).sum()
}

pub fn par_for_played(holes: &[&Hole]) -> u32 {
  holes.iter().map(|h| h.par as u32).sum()
}

pub fn to_par(book: &Scorebook, round: &Round) -> i32 {
  gross_for_round(round) as i32 - par_for_played(&book.played_holes(round)) as i32
}

/// Scale a nine-hole value to an 18-hole basis for cross-format comparison
pub fn normalize_to_18(value: f64, format: u8) -> f64 {
  match format {
    9 => value * 2.0,
    _ => value,
  }
}

/// `score - par` for each aligned hole that has a score
pub fn hole_diffs(book: &Scorebook, round: &Round) -> Vec<i32> {
  book
    .aligned(round)
    .into_iter()
    .filter(|(_, result)| result.is_scored())
    .map(|(hole, result)| result.score as i32 - hole.par as i32)
    .collect()
}

/// Holes played at double bogey or worse
pub fn blowup_count(book: &Scorebook, round: &Round) -> u32 {
  book
    .aligned(round)
    .into_iter()
    .filter(|(hole, result)| result.is_scored() && result.score as u32 >= hole.par as u32 + 2)
    .count() as u32
}

/// Spread of per-hole `score - par` within one round
pub fn round_volatility(book: &Scorebook, round: &Round) -> f64 {
  let diffs: Vec<f64> = hole_diffs(book, round).into_iter().map(f64::from).collect();
  sample_std_dev(&diffs)
}

/// Total putts, `None` when no hole has putts recorded
pub fn putts_for_round(round: &Round) -> Option<u32> {
  let recorded: Vec<u32> = round
    .hole_results
    .iter()
    .filter_map(|r| r.putts)
    .map(u32::from)
    .collect();
  if recorded.is_empty() {
    None
  } else {
    Some(recorded.into_iter().filter(|p| *p > 0).sum())
  }
}

/// Total penalty strokes. Unrecorded holes count as no penalty.
pub fn pens_for_round(round: &Round) -> u32 {
  round
    .hole_results
    .iter()
    .filter_map(|r| r.penalties)
    .filter(|p| *p > 0)
    .map(u32::from)
    .sum()
}

/// Simplified handicap differential for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDifferential {
  pub value: f64,
  /// True for nine-hole rounds, which only count as half a differential
  pub partial: bool,
}

pub fn score_differential(round: &Round, tee: Option<&Tee>) -> Option<ScoreDifferential> {
  let tee = tee?;
  let course_rating = tee.course_rating.filter(|cr| cr.is_finite())?;
  let slope = tee.slope_rating.filter(|s| *s > 0)? as f64;

  let partial = match round.format {
    9 => true,
    18 => false,
    _ => return None,
  };

  let gross = round
    .adjusted_gross
    .filter(|g| *g > 0)
    .unwrap_or_else(|| gross_for_round(round)) as f64;

  Some(ScoreDifferential {
    value: (gross - course_rating - PCC) * STANDARD_SLOPE / slope,
    partial,
  })
}

/// Everything the raw table and portal show for a single round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundMetrics {
  pub gross: u32,
  pub par: u32,
  pub to_par: i32,

  /// To-par on an 18-hole basis
  pub to_par_18: f64,

  pub blowups: u32,
  pub volatility: f64,

  /// Holes with a score entered
  pub holes_scored: usize,

  pub putts: Option<u32>,
  pub penalties: u32,

  /// Fairways hit out of fairways recorded
  pub fairways: Option<(u32, u32)>,

  /// Greens in regulation out of greens recorded
  pub greens: Option<(u32, u32)>,

  pub differential: Option<ScoreDifferential>,
}

impl RoundMetrics {
  pub fn compute(book: &Scorebook, round: &Round) -> Self {
    let holes = book.played_holes(round);
    let gross = gross_for_round(round);
    let par = par_for_played(&holes);
    let to_par = gross as i32 - par as i32;

    let tally = |pick: fn(&crate::models::HoleResult) -> Option<bool>| {
      let recorded: Vec<bool> = round.hole_results.iter().filter_map(pick).collect();
      if recorded.is_empty() {
        None
      } else {
        Some((recorded.iter().filter(|hit| **hit).count() as u32, recorded.len() as u32))
      }
    };

    Self {
      gross,
      par,
      to_par,
      to_par_18: normalize_to_18(to_par as f64, round.format),
      blowups: blowup_count(book, round),
      volatility: round_volatility(book, round),
      holes_scored: round.hole_results.iter().filter(|r| r.is_scored()).count(),
      putts: putts_for_round(round),
      penalties: pens_for_round(round),
      fairways: tally(|r| r.fairway_hit),
      greens: tally(|r| r.gir),
      differential: score_differential(round, book.tee_for(round)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tier 2: Bucketed Scoring Across Rounds
/// ---------------------------------------------------------------------------

/// Average `score - par` by hole par. `None` means no scored holes of that par.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ParTypeScoring {
  pub p3: Option<f64>,
  pub p4: Option<f64>,
  pub p5: Option<f64>,
}

impl ParTypeScoring {
  pub fn compute(book: &Scorebook, rounds: &[&Round]) -> Self {
    let mut p3 = Vec::new();
    let mut p4 = Vec::new();
    let mut p5 = Vec::new();

    for round in rounds {
      for (hole, result) in book.aligned(round) {
        if !result.is_scored() {
          continue;
        }
        let diff = result.score as f64 - hole.par as f64;
        match hole.par {
          3 => p3.push(diff),
          4 => p4.push(diff),
          5 => p5.push(diff),
          _ => {}
        }
      }
    }

    Self {
      p3: mean(&p3),
      p4: mean(&p4),
      p5: mean(&p5),
    }
  }
}

/// Difficulty band of a stroke index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiBand {
  Hard, // SI 1-6
  Mid,  // SI 7-12
  Easy, // SI 13-18
}

impl SiBand {
  pub fn from_stroke_index(si: u8) -> Option<Self> {
    match si {
      1..=6 => Some(SiBand::Hard),
      7..=12 => Some(SiBand::Mid),
      13..=18 => Some(SiBand::Easy),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      SiBand::Hard => "SI 1-6",
      SiBand::Mid => "SI 7-12",
      SiBand::Easy => "SI 13-18",
    }
  }
}

/// Average `score - par` by stroke-index band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StrokeIndexScoring {
  pub hard: Option<f64>,
  pub mid: Option<f64>,
  pub easy: Option<f64>,
}

impl StrokeIndexScoring {
  pub fn compute(book: &Scorebook, rounds: &[&Round]) -> Self {
    let mut hard = Vec::new();
    let mut mid = Vec::new();
    let mut easy = Vec::new();

    for round in rounds {
      for (hole, result) in book.aligned(round) {
        if !result.is_scored() {
          continue;
        }
        let diff = result.score as f64 - hole.par as f64;
        match SiBand::from_stroke_index(hole.stroke_index) {
          Some(SiBand::Hard) => hard.push(diff),
          Some(SiBand::Mid) => mid.push(diff),
          Some(SiBand::Easy) => easy.push(diff),
          None => {}
        }
      }
    }

    Self {
      hard: mean(&hard),
      mid: mean(&mid),
      easy: mean(&easy),
    }
  }

  /// How much worse hard holes play than easy ones, when both have data
  pub fn hard_easy_gap(&self) -> Option<f64> {
    match (self.hard, self.easy) {
      (Some(hard), Some(easy)) => Some(hard - easy),
      _ => None,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tier 3: Portal Summary and Chart Series
/// ---------------------------------------------------------------------------

/// Headline numbers for a set of rounds
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalStats {
  pub rounds: usize,

  /// Lowest 18-normalized to-par
  pub best_to_par: Option<f64>,

  /// Mean 18-normalized to-par
  pub avg_to_par: Option<f64>,

  pub avg_blowups: Option<f64>,
  pub avg_volatility: Option<f64>,

  /// Mean differential over full 18-hole rounds that have one
  pub avg_differential: Option<f64>,
}

impl PortalStats {
  pub fn compute(book: &Scorebook, rounds: &[&Round]) -> Self {
    let to_pars: Vec<f64> = rounds
      .iter()
      .map(|r| normalize_to_18(to_par(book, r) as f64, r.format))
      .collect();
    let blowups: Vec<f64> = rounds.iter().map(|r| blowup_count(book, r) as f64).collect();
    let volatility: Vec<f64> = rounds.iter().map(|r| round_volatility(book, r)).collect();
    let differentials: Vec<f64> = rounds
      .iter()
      .filter_map(|r| score_differential(r, book.tee_for(r)))
      .filter(|d| !d.partial)
      .map(|d| d.value)
      .collect();

    Self {
      rounds: rounds.len(),
      best_to_par: to_pars.iter().copied().reduce(f64::min),
      avg_to_par: mean(&to_pars),
      avg_blowups: mean(&blowups),
      avg_volatility: mean(&volatility),
      avg_differential: mean(&differentials),
    }
  }
}

/// Per-round to-par over time, ready for a line chart
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrendSeries {
  /// Round dates, `YYYY-MM-DD`
  pub labels: Vec<String>,
  /// 18-normalized to-par
  pub values: Vec<f64>,
  /// Unnormalized to-par, for tooltips
  pub raw: Vec<i32>,
  pub formats: Vec<u8>,
}

impl TrendSeries {
  /// Expects rounds already in date order
  pub fn compute(book: &Scorebook, rounds: &[&Round]) -> Self {
    let mut series = TrendSeries::default();
    for round in rounds {
      let raw = to_par(book, round);
      series.labels.push(round.date.format("%Y-%m-%d").to_string());
      series.values.push(normalize_to_18(raw as f64, round.format));
      series.raw.push(raw);
      series.formats.push(round.format);
    }
    series
  }
}

/// Labelled bucket averages for a bar chart. `None` bars have no data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSeries {
  pub labels: Vec<String>,
  pub values: Vec<Option<f64>>,
}

impl From<ParTypeScoring> for BucketSeries {
  fn from(s: ParTypeScoring) -> Self {
    Self {
      labels: vec!["Par 3".to_string(), "Par 4".to_string(), "Par 5".to_string()],
      values: vec![s.p3, s.p4, s.p5],
    }
  }
}

impl From<StrokeIndexScoring> for BucketSeries {
  fn from(s: StrokeIndexScoring) -> Self {
    Self {
      labels: [SiBand::Hard, SiBand::Mid, SiBand::Easy]
        .iter()
        .map(|b| b.label().to_string())
        .collect(),
      values: vec![s.hard, s.mid, s.easy],
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
