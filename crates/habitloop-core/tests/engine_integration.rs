//! Multi-day scenarios for the progress engine.
//!
//! Each scenario walks the calendar one day at a time the way a user
//! would: a session starts (day-boundary check), then habits get toggled.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use habitloop_core::progress::{evaluate_missed_day, toggle_completion, ProgressNotice};
use habitloop_core::{Difficulty, Habit, NewHabit};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn habit(difficulty: Difficulty) -> Habit {
    Habit::from_new(
        NewHabit {
            difficulty,
            ..NewHabit::named("Meditate")
        },
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
    )
    .unwrap()
}

/// Run one day: session start, then optionally complete today.
fn live_day(habit: Habit, today: NaiveDate, complete: bool) -> (Habit, Vec<ProgressNotice>) {
    let checked = evaluate_missed_day(habit, today);
    let mut notices = checked.notices;
    if !complete {
        return (checked.habit, notices);
    }
    let toggled = toggle_completion(checked.habit, today, today);
    notices.extend(toggled.notices);
    (toggled.habit, notices)
}

#[test]
fn medium_habit_reaches_hard_only_at_day_twenty_one() {
    let mut h = habit(Difficulty::Medium);
    for day in 0..21 {
        let today = start() + Duration::days(day);
        let (next, notices) = live_day(h, today, true);
        h = next;
        assert_eq!(h.streak as i64, day + 1);

        if day + 1 < 21 {
            assert_eq!(h.current_difficulty, Difficulty::Medium, "day {}", day + 1);
            assert!(notices.is_empty());
        } else {
            assert_eq!(h.current_difficulty, Difficulty::Hard);
            assert_eq!(
                notices,
                vec![ProgressNotice::DifficultyRaised {
                    from: Difficulty::Medium,
                    to: Difficulty::Hard,
                    streak: 21
                }]
            );
        }
    }
    assert_eq!(h.base_difficulty, Difficulty::Medium);
}

#[test]
fn tiny_habit_climbs_one_tier_per_milestone() {
    let mut h = habit(Difficulty::Tiny);
    let mut raised_on = Vec::new();
    for day in 0..21 {
        let today = start() + Duration::days(day);
        let (next, notices) = live_day(h, today, true);
        h = next;
        if !notices.is_empty() {
            raised_on.push((h.streak, h.current_difficulty));
        }
    }
    assert_eq!(
        raised_on,
        vec![
            (7, Difficulty::Easy),
            (14, Difficulty::Medium),
            (21, Difficulty::Hard)
        ]
    );
}

#[test]
fn two_missed_days_drop_to_tiny_and_streak_restarts() {
    let mut h = habit(Difficulty::Hard);
    for day in 0..5 {
        h = live_day(h, start() + Duration::days(day), true).0;
    }
    assert_eq!(h.streak, 5);

    // Days 5 and 6 skipped; sessions on days 6 and 7 observe them.
    let (h, notices) = live_day(h, start() + Duration::days(6), false);
    assert_eq!(h.missed_count, 1);
    assert_eq!(h.current_difficulty, Difficulty::Hard);
    assert!(notices.is_empty());

    let (h, notices) = live_day(h, start() + Duration::days(7), false);
    assert_eq!(h.missed_count, 2);
    assert_eq!(h.current_difficulty, Difficulty::Tiny);
    assert_eq!(h.streak, 0);
    assert!(matches!(
        notices.as_slice(),
        [ProgressNotice::DifficultyReduced { missed_count: 2, .. }]
    ));

    let (h, _) = live_day(h, start() + Duration::days(8), true);
    assert_eq!(h.streak, 1);
    assert_eq!(h.missed_count, 0);
}

#[test]
fn repeated_session_starts_count_a_miss_once() {
    let h = habit(Difficulty::Easy);
    let today = start() + Duration::days(3);
    let once = evaluate_missed_day(h, today).habit;
    let twice = evaluate_missed_day(once.clone(), today).habit;
    assert_eq!(once, twice);
    assert_eq!(twice.missed_count, 1);
}

#[test]
fn backfilling_yesterday_restores_the_run() {
    let mut h = habit(Difficulty::Tiny);
    for day in 0..3 {
        h = live_day(h, start() + Duration::days(day), true).0;
    }
    let today = start() + Duration::days(4);
    let h = evaluate_missed_day(h, today).habit;
    assert_eq!(h.streak, 0);

    let yesterday = today - Duration::days(1);
    let h = toggle_completion(h, yesterday, today).habit;
    assert_eq!(h.streak, 4);
    assert_eq!(h.missed_count, 1);

    let h = toggle_completion(h, today, today).habit;
    assert_eq!(h.streak, 5);
    assert_eq!(h.missed_count, 0);
}
