//! Round geometry: which holes of a tee were played, and in what order.

use crate::models::{Hole, Round, Tee};

/// The ordered holes a round was played over.
///
/// A round starting on 10 plays the back nine first. The sequence is cut to the
/// round format (9 or 18) and never runs past the tee's own holes.
pub fn played_holes<'t>(round: &Round, tee: Option<&'t Tee>) -> Vec<&'t Hole> {
  let Some(tee) = tee else {
    return Vec::new();
  };

  let holes = &tee.holes;
  let ordered: Vec<&Hole> = if round.start_hole == 10 && holes.len() > 9 {
    holes[9..].iter().chain(holes[..9].iter()).collect()
  } else {
    holes.iter().collect()
  };

  ordered.into_iter().take(round.format as usize).collect()
}
