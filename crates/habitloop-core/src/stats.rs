//! Weekly completion summaries.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Completions across all habits on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressData {
    pub date: NaiveDate,
    /// Short weekday name ("Mon".."Sun").
    pub day: String,
    pub completions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub days: Vec<ProgressData>,
    pub completions: u32,
    pub goal: u32,
    /// 0..=100+, not clamped; 0 when there is no goal.
    pub percentage: f64,
}

/// Seven entries, oldest first, ending at `today`.
pub fn weekly_progress(habits: &[Habit], today: NaiveDate) -> Vec<ProgressData> {
    (0..7u64)
        .rev()
        .filter_map(|n| today.checked_sub_days(Days::new(n)))
        .map(|date| ProgressData {
            date,
            day: date.format("%a").to_string(),
            completions: habits.iter().filter(|h| h.is_complete_on(date)).count() as u32,
        })
        .collect()
}

/// `goal` of `None` means one completion per habit per day.
pub fn weekly_summary(habits: &[Habit], today: NaiveDate, goal: Option<u32>) -> WeeklySummary {
    let days = weekly_progress(habits, today);
    let completions = days.iter().map(|d| d.completions).sum();
    let goal = goal.unwrap_or(habits.len() as u32 * 7);
    let percentage = if goal > 0 {
        f64::from(completions) / f64::from(goal) * 100.0
    } else {
        0.0
    };
    WeeklySummary {
        days,
        completions,
        goal,
        percentage,
    }
}

/// Habits not yet done today first; order is otherwise preserved.
pub fn sorted_for_today(habits: &[Habit], today: NaiveDate) -> Vec<&Habit> {
    let mut sorted: Vec<&Habit> = habits.iter().collect();
    sorted.sort_by_key(|h| h.is_complete_on(today));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::NewHabit;
    use chrono::{Duration, Utc};

    fn today() -> NaiveDate {
        // A Saturday.
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn habit(name: &str, done_days_ago: &[i64]) -> Habit {
        let mut h = Habit::from_new(NewHabit::named(name), Utc::now()).unwrap();
        for n in done_days_ago {
            h.completions.set(today() - Duration::days(*n), true);
        }
        h
    }

    #[test]
    fn seven_days_ending_today() {
        let days = weekly_progress(&[], today());
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, today() - Duration::days(6));
        assert_eq!(days[6].date, today());
        assert_eq!(days[6].day, "Sat");
    }

    #[test]
    fn counts_completions_per_day() {
        let habits = vec![habit("Walk", &[0, 1]), habit("Read", &[0, 8])];
        let days = weekly_progress(&habits, today());
        assert_eq!(days[6].completions, 2);
        assert_eq!(days[5].completions, 1);
        assert_eq!(days[0].completions, 0);
    }

    #[test]
    fn summary_defaults_goal_to_daily_per_habit() {
        let habits = vec![habit("Walk", &[0, 1, 2]), habit("Read", &[0])];
        let s = weekly_summary(&habits, today(), None);
        assert_eq!(s.completions, 4);
        assert_eq!(s.goal, 14);
        assert!((s.percentage - 400.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn zero_goal_yields_zero_percent() {
        let s = weekly_summary(&[], today(), None);
        assert_eq!(s.goal, 0);
        assert_eq!(s.percentage, 0.0);
    }

    #[test]
    fn incomplete_habits_sort_first() {
        let habits = vec![habit("A", &[0]), habit("B", &[]), habit("C", &[0]), habit("D", &[1])];
        let names: Vec<&str> = sorted_for_today(&habits, today())
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }
}
