//! Reducers over a single habit's progress state.
//!
//! All functions here are pure: they take a habit by value, return the
//! updated habit plus any notices, and cannot fail.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::difficulty::{on_missed_day_observed, on_streak_milestone, Transition};
use super::notice::ProgressNotice;
use super::streak::compute_streak;
use crate::habit::{CompletionMap, Habit};

/// Outcome of one engine operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub habit: Habit,
    /// Whether the operation left the target date marked complete.
    pub completed: bool,
    pub notices: Vec<ProgressNotice>,
}

fn apply(habit: &mut Habit, transition: Transition, notices: &mut Vec<ProgressNotice>) {
    if transition.changed() {
        debug!(
            habit = %habit.id,
            from = %transition.from,
            to = %transition.to,
            "difficulty transition"
        );
        habit.current_difficulty = transition.to;
    }
    notices.extend(transition.notices);
}

/// Flip the completion flag for `date` and refresh everything derived from it.
///
/// Marking a date complete may raise the difficulty by one tier. Only
/// marking `today` complete clears the missed-day counter: back-filling
/// yesterday repairs the streak but leaves `missed_count` as it was, so
/// a miss already observed still counts toward the next reduction.
/// Un-marking never changes the tier.
pub fn toggle_completion(mut habit: Habit, date: NaiveDate, today: NaiveDate) -> Progress {
    let completed = habit.completions.toggle(date);
    habit.streak = compute_streak(&habit.completions, today);

    let mut notices = Vec::new();
    if completed {
        let transition = on_streak_milestone(habit.current_difficulty, habit.streak);
        apply(&mut habit, transition, &mut notices);

        if date == today {
            habit.missed_count = 0;
        }
    }

    Progress {
        habit,
        completed,
        notices,
    }
}

/// Day-boundary check, run once per session start.
///
/// Neither yesterday nor today complete counts as one missed day. A second
/// run on the same calendar day is a no-op: the observation is keyed on
/// `last_missed_date`.
pub fn evaluate_missed_day(mut habit: Habit, today: NaiveDate) -> Progress {
    let mut notices = Vec::new();
    habit.streak = compute_streak(&habit.completions, today);

    let completed = habit.is_complete_on(today);
    if completed {
        habit.missed_count = 0;
    } else if let Some(yesterday) = today.pred_opt() {
        let already_observed = habit.last_missed_date == Some(yesterday);
        if !habit.is_complete_on(yesterday) && !already_observed {
            habit.missed_count += 1;
            habit.last_missed_date = Some(yesterday);
            let transition = on_missed_day_observed(habit.current_difficulty, habit.missed_count);
            apply(&mut habit, transition, &mut notices);
        }
    }

    Progress {
        habit,
        completed,
        notices,
    }
}

/// Erase the whole completion history and zero the streak.
pub fn reset_streak(mut habit: Habit) -> Progress {
    habit.streak = 0;
    habit.completions = CompletionMap::new();
    Progress {
        habit,
        completed: false,
        notices: vec![ProgressNotice::StreakReset],
    }
}
