//! Trailing windows over date-sorted rounds

use crate::models::Round;

/// Rounds in ascending date order. Same-day rounds keep their input order.
pub fn sorted_by_date<'a>(rounds: &[&'a Round]) -> Vec<&'a Round> {
  let mut sorted = rounds.to_vec();
  sorted.sort_by_key(|r| r.date);
  sorted
}

/// The most recent `size` rounds by date, oldest first
pub fn trailing<'a>(rounds: &[&'a Round], size: usize) -> Vec<&'a Round> {
  let sorted = sorted_by_date(rounds);
  let start = sorted.len().saturating_sub(size);
  sorted[start..].to_vec()
}

/// A recent window and the window immediately before it
#[derive(Debug, Clone)]
pub struct WindowPair<'a> {
  pub recent: Vec<&'a Round>,
  pub prior: Vec<&'a Round>,
}

/// Split into the last `size` rounds and the `size` before them. Either side
/// may come up short near the start of the history.
pub fn recent_and_prior<'a>(rounds: &[&'a Round], size: usize) -> WindowPair<'a> {
  let sorted = sorted_by_date(rounds);
  let recent_start = sorted.len().saturating_sub(size);
  let prior_start = recent_start.saturating_sub(size);

  WindowPair {
    recent: sorted[recent_start..].to_vec(),
    prior: sorted[prior_start..recent_start].to_vec(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::make_round;

  fn dated(dates: &[&str]) -> Vec<Round> {
    dates
      .iter()
      .enumerate()
      .map(|(i, d)| make_round(&format!("r{}", i), d, 18, &[4; 18]))
      .collect()
  }

  fn ids(rounds: &[&Round]) -> Vec<String> {
    rounds.iter().map(|r| r.round_id.clone()).collect()
  }

  #[test]
  fn test_trailing_sorts_before_cutting() {
    let rounds = dated(&["2024-05-03", "2024-05-01", "2024-05-04", "2024-05-02"]);
    let refs: Vec<&Round> = rounds.iter().collect();

    let last_two = trailing(&refs, 2);
    assert_eq!(ids(&last_two), vec!["r0", "r2"]);
  }

  #[test]
  fn test_trailing_shorter_history() {
    let rounds = dated(&["2024-05-01", "2024-05-02"]);
    let refs: Vec<&Round> = rounds.iter().collect();
    assert_eq!(trailing(&refs, 6).len(), 2);
    assert!(trailing(&[], 6).is_empty());
  }

  #[test]
  fn test_recent_and_prior_windows() {
    let dates: Vec<String> = (1..=25).map(|d| format!("2024-03-{:02}", d)).collect();
    let date_refs: Vec<&str> = dates.iter().map(String::as_str).collect();
    let rounds = dated(&date_refs);
    let refs: Vec<&Round> = rounds.iter().collect();

    let pair = recent_and_prior(&refs, 10);
    assert_eq!(pair.recent.len(), 10);
    assert_eq!(pair.prior.len(), 10);
    assert_eq!(pair.recent[0].round_id, "r15");
    assert_eq!(pair.prior[0].round_id, "r5");
  }

  #[test]
  fn test_prior_window_short_near_start() {
    let dates: Vec<String> = (1..=13).map(|d| format!("2024-03-{:02}", d)).collect();
    let date_refs: Vec<&str> = dates.iter().map(String::as_str).collect();
    let rounds = dated(&date_refs);
    let refs: Vec<&Round> = rounds.iter().collect();

    let pair = recent_and_prior(&refs, 10);
    assert_eq!(pair.recent.len(), 10);
    assert_eq!(pair.prior.len(), 3);
  }
}
