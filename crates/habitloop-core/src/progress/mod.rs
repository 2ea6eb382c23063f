mod difficulty;
mod engine;
mod notice;
mod streak;

pub use difficulty::{
    on_missed_day_observed, on_streak_milestone, Transition, MISSED_DAYS_BEFORE_REDUCTION,
};
pub use engine::{evaluate_missed_day, reset_streak, toggle_completion, Progress};
pub use notice::ProgressNotice;
pub use streak::compute_streak;
