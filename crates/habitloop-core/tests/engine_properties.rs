//! Property tests for streak computation and difficulty transitions.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, Utc};
use habitloop_core::progress::{compute_streak, toggle_completion};
use habitloop_core::{CompletionMap, Difficulty, Habit, NewHabit};
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn map(offsets: &BTreeSet<i64>) -> CompletionMap {
    offsets
        .iter()
        .map(|&n| (today() - Duration::days(n), true))
        .collect()
}

/// Reference: walk back from today (or yesterday) over the offset set.
fn naive_streak(offsets: &BTreeSet<i64>) -> u32 {
    let mut n = if offsets.contains(&0) { 0 } else { 1 };
    let mut count = 0;
    while offsets.contains(&n) {
        count += 1;
        n += 1;
    }
    count
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Tiny),
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn tier(d: Difficulty) -> i32 {
    match d {
        Difficulty::Tiny => 0,
        Difficulty::Easy => 1,
        Difficulty::Medium => 2,
        Difficulty::Hard => 3,
    }
}

fn habit_with(offsets: &BTreeSet<i64>, current: Difficulty) -> Habit {
    let mut habit = Habit::from_new(NewHabit::named("Stretch"), Utc::now()).unwrap();
    habit.completions = map(offsets);
    habit.current_difficulty = current;
    habit.streak = compute_streak(&habit.completions, today());
    habit
}

proptest! {
    #[test]
    fn streak_matches_reference(offsets in prop::collection::btree_set(0i64..60, 0..45)) {
        let completions = map(&offsets);
        let streak = compute_streak(&completions, today());
        prop_assert_eq!(streak, naive_streak(&offsets));
        prop_assert_eq!(streak, compute_streak(&completions, today()));
    }

    #[test]
    fn false_entries_do_not_affect_streak(
        offsets in prop::collection::btree_set(0i64..30, 0..20),
        cleared in prop::collection::btree_set(30i64..60, 0..10),
    ) {
        let mut completions = map(&offsets);
        for n in &cleared {
            completions.set(today() - Duration::days(*n), false);
        }
        prop_assert_eq!(compute_streak(&completions, today()), naive_streak(&offsets));
    }

    #[test]
    fn double_toggle_restores_history_and_streak(
        offsets in prop::collection::btree_set(0i64..40, 0..30),
        target in 0i64..40,
    ) {
        let initial = habit_with(&offsets, Difficulty::Tiny);
        let date = today() - Duration::days(target);
        let once = toggle_completion(initial.clone(), date, today()).habit;
        let twice = toggle_completion(once, date, today()).habit;
        prop_assert_eq!(&twice.completions, &initial.completions);
        prop_assert_eq!(twice.streak, initial.streak);
    }

    #[test]
    fn toggle_moves_at_most_one_tier_upward(
        offsets in prop::collection::btree_set(0i64..40, 0..40),
        target in 0i64..40,
        current in difficulty(),
    ) {
        let before = habit_with(&offsets, current);
        let progress = toggle_completion(before, today() - Duration::days(target), today());
        let delta = tier(progress.habit.current_difficulty) - tier(current);
        prop_assert!((0..=1).contains(&delta));
        if !progress.completed {
            prop_assert_eq!(delta, 0);
        }
    }
}
