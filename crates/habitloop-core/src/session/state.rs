use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::identity::UserIdentity;
use crate::stats::sorted_for_today;

/// Everything a single user session owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub identity: Option<UserIdentity>,
}

impl AppState {
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Display order: unfinished habits first.
    pub fn sorted_for_today(&self, today: NaiveDate) -> Vec<&Habit> {
        sorted_for_today(&self.habits, today)
    }
}

/// The reducer's notion of "now". Passed in so reductions stay pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

impl Clock {
    /// Wall clock, with "today" in the local time zone.
    pub fn system() -> Self {
        Self {
            today: Local::now().date_naive(),
            now: Utc::now(),
        }
    }

    /// Midday UTC on `today`; handy for tests and replays.
    pub fn on(today: NaiveDate) -> Self {
        let now = today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self { today, now }
    }
}
