//! Streak computation from a sparse completion record.

use chrono::NaiveDate;

use crate::habit::CompletionMap;

/// Count consecutive completed days ending at `today` or, when today is not
/// marked yet, at yesterday.
///
/// An unmarked today does not break a run that ended yesterday; it simply
/// isn't counted.
pub fn compute_streak(completions: &CompletionMap, today: NaiveDate) -> u32 {
    let mut cursor = if completions.is_complete(today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while completions.is_complete(cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}
