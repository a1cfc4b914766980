//! Blow-up Reduction Goal
//!
//! A goal measures the recent blow-up rate against a baseline captured once,
//! the first time enough rounds exist in the goal window:
//! - `Uninitialized` until the window holds the minimum number of rounds
//! - `Tracking` from then on; the baseline is never recomputed
//!
//! Transitions are pure. The caller persists the returned goal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analysis::{blowup_count, mean};
use crate::config::EngineThresholds;
use crate::models::{Goal, GoalBaseline, GoalType, Round};
use crate::scorebook::Scorebook;
use crate::window::trailing;

// ---------------------------------------------------------------------------
/// Baseline Transition
// ---------------------------------------------------------------------------

fn window_blowup_rate(book: &Scorebook, goal: &Goal, thresholds: &EngineThresholds) -> (usize, Option<f64>) {
    let rounds: Vec<&Round> = book.rounds();
    let window = trailing(&rounds, goal.window_rounds);
    if window.len() < thresholds.goal_min_rounds {
        return (window.len(), None);
    }
    let counts: Vec<f64> = window.iter().map(|r| blowup_count(book, r) as f64).collect();
    (window.len(), mean(&counts))
}

/// Capture the baseline if the goal is active, still uninitialized and the
/// window has enough rounds. Otherwise the goal comes back unchanged.
pub fn ensure_goal(goal: &Goal, book: &Scorebook, today: NaiveDate, thresholds: &EngineThresholds) -> Goal {
    if !goal.active || goal.is_tracking() {
        return goal.clone();
    }

    match window_blowup_rate(book, goal, thresholds) {
        (_, Some(baseline_blowups)) => Goal {
            baseline: GoalBaseline::Tracking {
                baseline_blowups,
                created_at: today,
            },
            ..goal.clone()
        },
        (_, None) => goal.clone(),
    }
}

impl Goal {
    /// A new goal with different settings. Changing the definition starts
    /// over, so the baseline is cleared.
    pub fn reconfigure(&self, active: bool, window_rounds: usize, reduction_pct: u32) -> Goal {
        Goal {
            active,
            goal_type: GoalType::ReduceBlowups,
            window_rounds: window_rounds.max(1),
            reduction_pct: reduction_pct.min(100),
            baseline: GoalBaseline::Uninitialized,
        }
    }

    /// Blow-ups per round the goal aims for
    pub fn target_blowups(&self) -> Option<f64> {
        self.baseline_blowups()
            .map(|baseline| baseline * (1.0 - self.reduction_pct as f64 / 100.0))
    }
}

// ---------------------------------------------------------------------------
/// Progress Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Goal switched off
    Inactive,
    /// Active but no baseline yet
    AwaitingBaseline,
    /// Baseline set but the window is short (rounds were deleted)
    NeedMoreRounds,
    Tracking,
}

/// What the goal card shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub status: GoalStatus,
    /// 0-100, only while tracking
    pub pct: Option<f64>,
    pub title: String,
    pub subtitle: String,
    pub baseline: Option<f64>,
    pub target: Option<f64>,
    pub current: Option<f64>,
    pub rounds_in_window: usize,
}

pub fn goal_progress(goal: &Goal, book: &Scorebook, thresholds: &EngineThresholds) -> GoalProgress {
    let headline = format!("Goal: cut blow-up holes by {}%", goal.reduction_pct);
    let (rounds_in_window, current) = window_blowup_rate(book, goal, thresholds);

    if !goal.active {
        return GoalProgress {
            status: GoalStatus::Inactive,
            pct: None,
            title: "No active goal".to_string(),
            subtitle: "Switch on the blow-up goal to track progress.".to_string(),
            baseline: None,
            target: None,
            current: None,
            rounds_in_window,
        };
    }

    let (Some(baseline), Some(target)) = (goal.baseline_blowups(), goal.target_blowups()) else {
        return GoalProgress {
            status: GoalStatus::AwaitingBaseline,
            pct: None,
            title: headline,
            subtitle: format!(
                "Your baseline is set once {} rounds are logged ({} so far).",
                thresholds.goal_min_rounds, rounds_in_window
            ),
            baseline: None,
            target: None,
            current: None,
            rounds_in_window,
        };
    };

    let Some(current) = current else {
        return GoalProgress {
            status: GoalStatus::NeedMoreRounds,
            pct: None,
            title: headline,
            subtitle: format!(
                "Log {} more round(s) to measure progress.",
                thresholds.goal_min_rounds - rounds_in_window
            ),
            baseline: Some(baseline),
            target: Some(target),
            current: None,
            rounds_in_window,
        };
    };

    let denominator = if baseline == target { 1.0 } else { baseline - target };
    let pct = ((baseline - current) / denominator * 100.0).clamp(0.0, 100.0);

    GoalProgress {
        status: GoalStatus::Tracking,
        pct: Some(pct),
        title: headline,
        subtitle: format!(
            "Baseline {:.1} per round, target {:.1}, now {:.1} over the last {} rounds.",
            baseline, target, current, rounds_in_window
        ),
        baseline: Some(baseline),
        target: Some(target),
        current: Some(current),
        rounds_in_window,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;
    use crate::test_utils::{make_course, make_round_on, make_tee_with_pars};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn course() -> Vec<Course> {
        vec![make_course("c1", vec![make_tee_with_pars("t1", &[4; 18])])]
    }

    /// A par-4 round with `blowups` double bogeys
    fn round_with_blowups(id: &str, date: &str, blowups: usize) -> Round {
        let mut scores = [4u8; 18];
        scores[..blowups].fill(6);
        make_round_on(id, date, "c1", "t1", 18, &scores)
    }

    fn history(blowups: &[usize]) -> Vec<Round> {
        blowups
            .iter()
            .enumerate()
            .map(|(i, b)| round_with_blowups(&format!("r{}", i), &format!("2024-06-{:02}", i + 1), *b))
            .collect()
    }

    #[test]
    fn test_no_baseline_below_three_rounds() {
        let courses = course();
        let rounds = history(&[2, 4]);
        let book = Scorebook::new(&courses, &rounds);

        let goal = ensure_goal(&Goal::default(), &book, today(), &EngineThresholds::default());
        assert!(!goal.is_tracking());

        let progress = goal_progress(&goal, &book, &EngineThresholds::default());
        assert_eq!(progress.status, GoalStatus::AwaitingBaseline);
        assert!(progress.pct.is_none());
    }

    #[test]
    fn test_baseline_set_from_trailing_window() {
        let courses = course();
        // Window is the last 5 of 6: the first round (10 blow-ups) is out
        let rounds = history(&[10, 2, 2, 3, 3, 5]);
        let book = Scorebook::new(&courses, &rounds);

        let goal = ensure_goal(&Goal::default(), &book, today(), &EngineThresholds::default());
        assert_eq!(
            goal.baseline,
            GoalBaseline::Tracking {
                baseline_blowups: 3.0,
                created_at: today()
            }
        );
    }

    #[test]
    fn test_ensure_goal_is_sticky() {
        let courses = course();
        let rounds = history(&[3, 3, 3]);
        let book = Scorebook::new(&courses, &rounds);
        let thresholds = EngineThresholds::default();

        let first = ensure_goal(&Goal::default(), &book, today(), &thresholds);
        let again = ensure_goal(&first, &book, today(), &thresholds);
        assert_eq!(first, again);

        // Later data does not move the baseline
        let better = history(&[0, 0, 0, 0, 0]);
        let later_book = Scorebook::new(&courses, &better);
        let later = ensure_goal(&first, &later_book, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), &thresholds);
        assert_eq!(later.baseline_blowups(), Some(3.0));
        assert_eq!(later, first);
    }

    #[test]
    fn test_inactive_goal_never_initializes() {
        let courses = course();
        let rounds = history(&[3, 3, 3]);
        let book = Scorebook::new(&courses, &rounds);
        let goal = Goal {
            active: false,
            ..Goal::default()
        };

        let after = ensure_goal(&goal, &book, today(), &EngineThresholds::default());
        assert!(!after.is_tracking());
        assert_eq!(
            goal_progress(&after, &book, &EngineThresholds::default()).status,
            GoalStatus::Inactive
        );
    }

    #[test]
    fn test_progress_halfway() {
        let courses = course();
        // Ten rounds averaging 2.7 blow-ups
        let rounds = history(&[3, 3, 3, 3, 3, 3, 3, 2, 2, 2]);
        let book = Scorebook::new(&courses, &rounds);
        let goal = Goal {
            window_rounds: 10,
            reduction_pct: 20,
            baseline: GoalBaseline::Tracking {
                baseline_blowups: 3.0,
                created_at: today(),
            },
            ..Goal::default()
        };

        let progress = goal_progress(&goal, &book, &EngineThresholds::default());
        assert_eq!(progress.status, GoalStatus::Tracking);
        assert!((progress.target.unwrap() - 2.4).abs() < 1e-9);
        assert!((progress.current.unwrap() - 2.7).abs() < 1e-9);
        assert!((progress.pct.unwrap() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_progress_clamped() {
        let courses = course();
        let tracking = |baseline_blowups| Goal {
            baseline: GoalBaseline::Tracking {
                baseline_blowups,
                created_at: today(),
            },
            ..Goal::default()
        };

        // Worse than baseline → 0
        let worse = history(&[5, 5, 5]);
        let book = Scorebook::new(&courses, &worse);
        assert_eq!(goal_progress(&tracking(3.0), &book, &EngineThresholds::default()).pct, Some(0.0));

        // Past the target → 100
        let clean = history(&[0, 0, 0]);
        let book = Scorebook::new(&courses, &clean);
        assert_eq!(goal_progress(&tracking(3.0), &book, &EngineThresholds::default()).pct, Some(100.0));
    }

    #[test]
    fn test_zero_reduction_guards_division() {
        let courses = course();
        let rounds = history(&[2, 2, 2]);
        let book = Scorebook::new(&courses, &rounds);
        let goal = Goal {
            reduction_pct: 0,
            baseline: GoalBaseline::Tracking {
                baseline_blowups: 3.0,
                created_at: today(),
            },
            ..Goal::default()
        };

        let progress = goal_progress(&goal, &book, &EngineThresholds::default());
        // (3 - 2) / 1 * 100, clamped
        assert_eq!(progress.pct, Some(100.0));
        assert!(progress.pct.unwrap().is_finite());
    }

    #[test]
    fn test_need_more_rounds_after_baseline() {
        let courses = course();
        let rounds = history(&[1, 1]);
        let book = Scorebook::new(&courses, &rounds);
        let goal = Goal {
            baseline: GoalBaseline::Tracking {
                baseline_blowups: 3.0,
                created_at: today(),
            },
            ..Goal::default()
        };

        let progress = goal_progress(&goal, &book, &EngineThresholds::default());
        assert_eq!(progress.status, GoalStatus::NeedMoreRounds);
        assert!(progress.pct.is_none());
        assert_eq!(progress.baseline, Some(3.0));
    }

    #[test]
    fn test_reconfigure_clears_baseline() {
        let goal = Goal {
            baseline: GoalBaseline::Tracking {
                baseline_blowups: 3.0,
                created_at: today(),
            },
            ..Goal::default()
        };

        let next = goal.reconfigure(true, 8, 150);
        assert!(!next.is_tracking());
        assert_eq!(next.window_rounds, 8);
        assert_eq!(next.reduction_pct, 100);
    }

    #[test]
    fn test_goal_serializes_flat() {
        let goal = Goal {
            baseline: GoalBaseline::Tracking {
                baseline_blowups: 2.5,
                created_at: today(),
            },
            ..Goal::default()
        };
        let json = serde_json::to_value(&goal).unwrap();
        assert!(json.get("state").is_none());
        assert!(json.get("baseline").is_none());
        assert_eq!(json["baselineBlowups"], 2.5);
        assert_eq!(json["createdAt"], "2024-07-01");
        assert_eq!(json["type"], "reduce_blowups");

        let back: Goal = serde_json::from_value(json).unwrap();
        assert_eq!(back, goal);

        let fresh = serde_json::to_value(Goal::default()).unwrap();
        assert_eq!(fresh["baselineBlowups"], serde_json::Value::Null);
        assert_eq!(fresh["createdAt"], serde_json::Value::Null);
    }
}
