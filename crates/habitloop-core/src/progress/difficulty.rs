//! Adaptive difficulty state machine.
//!
//! ## State Transitions
//!
//! ```text
//! tiny --(streak >= 7)--> easy --(streak >= 14)--> medium --(streak >= 21)--> hard
//!   ^                                                                          |
//!   +------------------- (missed_count >= 2, from any tier) ------------------+
//! ```
//!
//! Each transition function applies at most one edge per call.

use serde::{Deserialize, Serialize};

use super::notice::ProgressNotice;
use crate::habit::Difficulty;

/// Streak needed to leave each tier upward. `hard` has no further step.
const MILESTONES: [(Difficulty, u32, Difficulty); 3] = [
    (Difficulty::Tiny, 7, Difficulty::Easy),
    (Difficulty::Easy, 14, Difficulty::Medium),
    (Difficulty::Medium, 21, Difficulty::Hard),
];

/// Consecutive misses that force a habit down to `tiny`.
pub const MISSED_DAYS_BEFORE_REDUCTION: u32 = 2;

/// Result of running one transition function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Difficulty,
    pub to: Difficulty,
    pub notices: Vec<ProgressNotice>,
}

impl Transition {
    fn stay(current: Difficulty) -> Self {
        Self {
            from: current,
            to: current,
            notices: Vec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Raise the tier by one step when `streak` meets the threshold for the
/// current tier.
pub fn on_streak_milestone(current: Difficulty, streak: u32) -> Transition {
    let step = MILESTONES
        .iter()
        .find(|(from, threshold, _)| *from == current && streak >= *threshold);

    match step {
        Some(&(from, _, to)) => Transition {
            from,
            to,
            notices: vec![ProgressNotice::DifficultyRaised { from, to, streak }],
        },
        None => Transition::stay(current),
    }
}

/// Drop straight to `tiny` once enough consecutive days were missed.
pub fn on_missed_day_observed(current: Difficulty, missed_count: u32) -> Transition {
    if missed_count >= MISSED_DAYS_BEFORE_REDUCTION && current != Difficulty::Tiny {
        Transition {
            from: current,
            to: Difficulty::Tiny,
            notices: vec![ProgressNotice::DifficultyReduced {
                from: current,
                to: Difficulty::Tiny,
                missed_count,
            }],
        }
    } else {
        Transition::stay(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_escalates_at_seven() {
        assert!(!on_streak_milestone(Difficulty::Tiny, 6).changed());
        let t = on_streak_milestone(Difficulty::Tiny, 7);
        assert_eq!(t.to, Difficulty::Easy);
        assert_eq!(t.notices.len(), 1);
    }

    #[test]
    fn large_streak_moves_only_one_tier() {
        assert_eq!(on_streak_milestone(Difficulty::Tiny, 100).to, Difficulty::Easy);
        assert_eq!(on_streak_milestone(Difficulty::Easy, 100).to, Difficulty::Medium);
        assert_eq!(on_streak_milestone(Difficulty::Medium, 100).to, Difficulty::Hard);
    }

    #[test]
    fn thresholds_are_per_tier() {
        assert!(!on_streak_milestone(Difficulty::Easy, 13).changed());
        assert!(on_streak_milestone(Difficulty::Easy, 14).changed());
        assert!(!on_streak_milestone(Difficulty::Medium, 20).changed());
        assert!(on_streak_milestone(Difficulty::Medium, 21).changed());
    }

    #[test]
    fn hard_is_terminal() {
        let t = on_streak_milestone(Difficulty::Hard, 365);
        assert_eq!(t.to, Difficulty::Hard);
        assert!(t.notices.is_empty());
    }

    #[test]
    fn first_miss_does_not_reduce() {
        assert!(!on_missed_day_observed(Difficulty::Hard, 1).changed());
    }

    #[test]
    fn second_miss_reduces_to_tiny() {
        let t = on_missed_day_observed(Difficulty::Hard, 2);
        assert_eq!(t.to, Difficulty::Tiny);
        assert!(matches!(
            t.notices.as_slice(),
            [ProgressNotice::DifficultyReduced { missed_count: 2, .. }]
        ));
    }

    #[test]
    fn tiny_stays_tiny_without_notice() {
        let t = on_missed_day_observed(Difficulty::Tiny, 5);
        assert!(!t.changed());
        assert!(t.notices.is_empty());
    }
}
